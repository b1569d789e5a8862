use thiserror::Error;

/// An invalid pool configuration.
///
/// This is the only condition that aborts a run before any work is
/// dispatched; everything else the pool encounters is counted and surfaced
/// through statistics.
#[derive(Debug, Error)]
#[error("config error: {0}")]
pub struct ConfigError(pub String);
