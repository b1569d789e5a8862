use std::process;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use connpool::sim::{SimBackend, SimConnection};
use connpool::{run_pooled, Connection, PoolConfig};

const POOL_SIZE: usize = 10;
const REQUESTS: usize = 1000;
const OP_DELAY: Duration = Duration::from_millis(10);

fn main() {
    tracing_subscriber::fmt::init();

    let backend = Arc::new(SimBackend::default());

    println!("Initializing connection pool...");
    let factory = backend.clone();
    let pool = match PoolConfig::new(move || factory.connect())
        .capacity(POOL_SIZE)
        .dispose(|mut conn: SimConnection| conn.close())
        .handle_error(|err| warn!(error = %err, "failed to open connection"))
        .build()
    {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Failed to create connection pool: {err}");
            process::exit(1);
        }
    };

    println!("Running benchmark with connection pooling...");
    println!("\nStarting benchmark with {REQUESTS} requests (using pooling)...");
    let summary = run_pooled(&pool, REQUESTS, OP_DELAY);

    println!("\nBenchmark complete (with pooling)");
    println!("{summary}");

    pool.drain();
}
