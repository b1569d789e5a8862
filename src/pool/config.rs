use std::collections::VecDeque;
use std::time::Duration;

use tracing::warn;

use super::error::ConfigError;
use super::pool::{CreateFn, DisposeFn, ErrorFn, Pool, PoolInner, Slot};

/// How a caller waits when the idle store is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// Park on a condition variable signaled once per re-admitted slot.
    Notify,
    /// Cooperatively poll: unlock, sleep for the interval, re-check.
    ///
    /// This reproduces the original benchmark's wait discipline, trading
    /// wasted wake-ups and bounded handoff latency for simplicity.
    Poll(Duration),
}

/// Builder for a [`Pool`].
pub struct PoolConfig<T: Send + 'static, E: 'static> {
    capacity: usize,
    wait_mode: WaitMode,
    replace_broken: bool,
    create: CreateFn<T, E>,
    on_dispose: Option<DisposeFn<T>>,
    handle_error: Option<ErrorFn<E>>,
}

impl<T: Send, E> PoolConfig<T, E> {
    pub fn new<F>(create: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        Self {
            capacity: 0,
            wait_mode: WaitMode::Notify,
            replace_broken: false,
            create: Box::new(create),
            on_dispose: None,
            handle_error: None,
        }
    }

    /// Fixed maximum number of slots. Required; the pool never grows or
    /// shrinks its slot count on its own.
    pub fn capacity(mut self, val: usize) -> Self {
        self.capacity = val;
        self
    }

    pub fn wait_mode(mut self, val: WaitMode) -> Self {
        self.wait_mode = val;
        self
    }

    /// Replace a connection flagged broken at release time instead of
    /// re-admitting it blindly. Defaults to off, matching the behavior the
    /// benchmark measures.
    pub fn replace_broken(mut self, val: bool) -> Self {
        self.replace_broken = val;
        self
    }

    /// Callback invoked with every connection the pool disposes of.
    pub fn dispose<F>(mut self, dispose: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.on_dispose.replace(Box::new(dispose));
        self
    }

    /// Callback invoked with factory errors the pool absorbs.
    pub fn handle_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        self.handle_error.replace(Box::new(handler));
        self
    }

    /// Eagerly create `capacity` connections and build the pool.
    ///
    /// A connection that fails to open still occupies its capacity slot, as
    /// a vacant marker; it is neither dropped nor retried. Construction
    /// itself only fails on an invalid configuration.
    pub fn build(self) -> Result<Pool<T, E>, ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError("pool capacity must be at least 1".into()));
        }
        let mut idle = VecDeque::with_capacity(self.capacity);
        let mut live = 0;
        let mut vacant = 0;
        for slot in 0..self.capacity {
            match (self.create)() {
                Ok(conn) => {
                    live += 1;
                    idle.push_back(Slot::Live(conn));
                }
                Err(err) => {
                    warn!(slot, "connection failed to open during pool prewarm");
                    vacant += 1;
                    idle.push_back(Slot::Vacant);
                    if let Some(handler) = self.handle_error.as_ref() {
                        (handler)(err)
                    }
                }
            }
        }
        Ok(Pool::new(PoolInner::new(
            idle,
            live,
            vacant,
            self.capacity,
            self.wait_mode,
            self.replace_broken,
            self.create,
            self.on_dispose,
            self.handle_error,
        )))
    }
}
