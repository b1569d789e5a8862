use std::sync::Arc;
use std::time::Duration;

use connpool::run_direct;
use connpool::sim::SimBackend;

const REQUESTS: usize = 1000;
const OP_DELAY: Duration = Duration::from_millis(10);

fn main() {
    tracing_subscriber::fmt::init();

    let backend = Arc::new(SimBackend::default());

    println!("Running benchmark without connection pooling...");
    println!("\nStarting benchmark with {REQUESTS} connections (no pooling)...");
    let factory = backend.clone();
    let summary = run_direct(move || factory.connect(), REQUESTS, OP_DELAY);

    println!("\nBenchmark complete (no pooling)");
    println!("{summary}");
}
