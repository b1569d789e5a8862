use thiserror::Error;

/// A connection could not be established, or failed its liveness check.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The underlying transport could not be established.
    #[error("failed to open connection: {0}")]
    Transport(String),
    /// The connection was constructed but failed the round-trip check.
    #[error("connection failed liveness check: {0}")]
    Ping(String),
}

/// A unit of work failed against a live connection.
///
/// The classification decides the caller's disposition of the connection:
/// a lost connection is unusable, any other backend error leaves it intact.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The remote end closed the stream (end-of-stream condition).
    #[error("connection lost: unexpected end of stream")]
    ConnectionLost,
    /// Any other backend-reported execution failure.
    #[error("execution failed: {0}")]
    Backend(String),
}

impl ExecError {
    /// Whether the connection that produced this error is unusable.
    pub fn is_connection_lost(&self) -> bool {
        matches!(self, Self::ConnectionLost)
    }
}
