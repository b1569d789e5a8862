mod bench;
pub use self::bench::{run_direct, run_pooled, RunSummary};

mod conn;
pub use self::conn::{ConnectError, Connection, ExecError};

mod pool;
pub use self::pool::{ConfigError, Pool, PoolConfig, PoolStats, Pooled, WaitMode};

pub mod sim;
