mod config;
pub use config::{PoolConfig, WaitMode};

mod error;
pub use error::ConfigError;

mod managed;
pub use managed::Pooled;

mod pool;
pub use pool::Pool;

mod stats;
pub use stats::PoolStats;
