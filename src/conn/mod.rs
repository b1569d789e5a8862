mod error;
pub use error::{ConnectError, ExecError};

/// One live, stateful connection to a backend service.
///
/// A connection runs opaque units of work until it is closed. Closing is
/// irreversible: a closed connection must never be executed against again,
/// and must never be returned to a pool.
pub trait Connection: Send + 'static {
    /// One opaque unit of work. Only its success or failure is observed.
    type Op;

    /// Run one unit of work against the live connection.
    fn execute(&mut self, op: &Self::Op) -> Result<(), ExecError>;

    /// Release the underlying transport.
    fn close(&mut self);
}
