//! Benchmark harness: drives one thread per simulated request through
//! either the pool or the no-pool baseline and aggregates the outcome.

use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use tracing::{debug, trace};

use crate::conn::Connection;
use crate::pool::Pool;

mod report;
pub use report::RunSummary;

/// Run `requests` units of work through the pool, one thread per request.
///
/// Every request acquires a slot, executes `op` once and releases the slot
/// by dropping the guard. A vacant slot counts as a failure. A connection
/// that reports `ConnectionLost` is flagged broken before release, so the
/// pool's configured policy decides whether it is replaced or re-admitted.
pub fn run_pooled<C, E>(pool: &Pool<C, E>, requests: usize, op: C::Op) -> RunSummary
where
    C: Connection,
    C::Op: Sync,
{
    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let start = Instant::now();

    thread::scope(|scope| {
        for request in 1..=requests {
            let (succeeded, failed, op) = (&succeeded, &failed, &op);
            scope.spawn(move || {
                trace!(request, "acquiring connection from pool");
                let mut conn = pool.acquire();
                match conn.get_mut() {
                    None => {
                        debug!(request, "no usable connection in slot, operation skipped");
                        failed.fetch_add(1, Ordering::SeqCst);
                    }
                    Some(live) => match live.execute(op) {
                        Ok(()) => {
                            trace!(request, "query executed, returning connection to pool");
                            succeeded.fetch_add(1, Ordering::SeqCst);
                        }
                        Err(err) => {
                            debug!(request, error = %err, "query execution failed");
                            if err.is_connection_lost() {
                                conn.flag_broken();
                            }
                            failed.fetch_add(1, Ordering::SeqCst);
                        }
                    },
                }
            });
        }
    });

    RunSummary::new(
        requests,
        succeeded.into_inner(),
        failed.into_inner(),
        start.elapsed(),
    )
}

/// No-pool baseline: each request opens a fresh connection, executes `op`
/// once and closes it. Shares the connection contract with the pooled run
/// but none of the pooling logic.
pub fn run_direct<C, E, F>(connect: F, requests: usize, op: C::Op) -> RunSummary
where
    C: Connection,
    C::Op: Sync,
    E: Display,
    F: Fn() -> Result<C, E> + Sync,
{
    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let start = Instant::now();

    thread::scope(|scope| {
        for request in 1..=requests {
            let (succeeded, failed, op, connect) = (&succeeded, &failed, &op, &connect);
            scope.spawn(move || match connect() {
                Err(err) => {
                    debug!(request, error = %err, "skipping operation, connection failed");
                    failed.fetch_add(1, Ordering::SeqCst);
                }
                Ok(mut conn) => {
                    match conn.execute(op) {
                        Ok(()) => {
                            trace!(request, "query executed");
                            succeeded.fetch_add(1, Ordering::SeqCst);
                        }
                        Err(err) => {
                            debug!(request, error = %err, "query execution failed");
                            failed.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                    conn.close();
                }
            });
        }
    });

    RunSummary::new(
        requests,
        succeeded.into_inner(),
        failed.into_inner(),
        start.elapsed(),
    )
}
