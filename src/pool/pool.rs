use std::collections::VecDeque;
use std::fmt::{self, Debug, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, warn};

use super::config::WaitMode;
use super::managed::Pooled;
use super::stats::PoolStats;

pub(crate) type CreateFn<T, E> = Box<dyn Fn() -> Result<T, E> + Send + Sync>;
pub(crate) type DisposeFn<T> = Box<dyn Fn(T) + Send + Sync>;
pub(crate) type ErrorFn<E> = Box<dyn Fn(E) + Send + Sync>;

/// One capacity slot. A slot whose open failed is recorded as `Vacant`
/// rather than dropped; it circulates like any other slot and is never
/// retried.
pub(crate) enum Slot<T> {
    Live(T),
    Vacant,
}

impl<T> Slot<T> {
    fn is_live(&self) -> bool {
        matches!(self, Slot::Live(_))
    }
}

pub(crate) struct PoolState<T> {
    /// Slots not currently held by any caller. Order is not semantically
    /// significant; first-available wins.
    idle: VecDeque<Slot<T>>,
    /// Live connections in existence, idle or held.
    live: usize,
    /// Capacity slots occupied by a failed open, idle or held.
    vacant: usize,
    /// Set by `drain`; releases dispose instead of re-admitting.
    closed: bool,
}

pub(crate) struct PoolInner<T, E> {
    state: Mutex<PoolState<T>>,
    available: Condvar,
    capacity: usize,
    wait_mode: WaitMode,
    replace_broken: bool,
    create: CreateFn<T, E>,
    on_dispose: Option<DisposeFn<T>>,
    handle_error: Option<ErrorFn<E>>,
    waiting: AtomicUsize,
}

impl<T: Send, E> PoolInner<T, E> {
    pub(crate) fn new(
        idle: VecDeque<Slot<T>>,
        live: usize,
        vacant: usize,
        capacity: usize,
        wait_mode: WaitMode,
        replace_broken: bool,
        create: CreateFn<T, E>,
        on_dispose: Option<DisposeFn<T>>,
        handle_error: Option<ErrorFn<E>>,
    ) -> Self {
        Self {
            state: Mutex::new(PoolState {
                idle,
                live,
                vacant,
                closed: false,
            }),
            available: Condvar::new(),
            capacity,
            wait_mode,
            replace_broken,
            create,
            on_dispose,
            handle_error,
            waiting: AtomicUsize::new(0),
        }
    }

    /// Remove one slot from the idle store, blocking while it is empty.
    ///
    /// The lock is never held while waiting: `Notify` parks on the condvar
    /// (releasing the lock), `Poll` unlocks, sleeps for the configured
    /// interval and re-checks. There is no timeout and no fairness ordering.
    fn acquire_slot(&self) -> Slot<T> {
        let mut state = self.state.lock();
        if let Some(slot) = state.idle.pop_front() {
            return slot;
        }
        self.waiting.fetch_add(1, Ordering::SeqCst);
        let slot = loop {
            match self.wait_mode {
                WaitMode::Notify => self.available.wait(&mut state),
                WaitMode::Poll(interval) => {
                    MutexGuard::unlocked(&mut state, || thread::sleep(interval))
                }
            }
            if let Some(slot) = state.idle.pop_front() {
                break slot;
            }
        };
        self.waiting.fetch_sub(1, Ordering::SeqCst);
        slot
    }

    fn try_acquire_slot(&self) -> Option<Slot<T>> {
        self.state.lock().idle.pop_front()
    }

    /// Re-admit a slot to the idle store unconditionally.
    ///
    /// The pool does not distinguish a slot whose last use succeeded from
    /// one whose last use failed; health signals arrive separately through
    /// `release_broken`.
    pub(crate) fn release(&self, slot: Slot<T>) {
        let mut state = self.state.lock();
        if state.closed {
            match slot {
                Slot::Live(_) => state.live -= 1,
                Slot::Vacant => state.vacant -= 1,
            }
            drop(state);
            self.dispose(slot);
            return;
        }
        state.idle.push_back(slot);
        drop(state);
        self.available.notify_one();
    }

    /// Re-admit a slot the caller flagged as broken.
    ///
    /// With `replace_broken` unset this is a plain release, reproducing the
    /// original pool's blind re-admission. Otherwise the connection is
    /// disposed and the factory is re-invoked so the slot re-enters the
    /// idle store with a fresh connection; if the replacement fails to open
    /// the slot re-enters vacant, keeping the capacity accounting stable.
    pub(crate) fn release_broken(&self, slot: Slot<T>) {
        if !self.replace_broken || !slot.is_live() || self.state.lock().closed {
            return self.release(slot);
        }
        self.dispose(slot);
        let replacement = (self.create)();
        let mut state = self.state.lock();
        state.live -= 1;
        if state.closed {
            drop(state);
            if let Ok(conn) = replacement {
                self.dispose(Slot::Live(conn));
            }
            return;
        }
        match replacement {
            Ok(conn) => {
                state.live += 1;
                state.idle.push_back(Slot::Live(conn));
                drop(state);
                debug!("replaced broken connection");
                self.available.notify_one();
            }
            Err(err) => {
                state.vacant += 1;
                state.idle.push_back(Slot::Vacant);
                drop(state);
                warn!("replacement connection failed to open");
                self.handle_error(err);
                self.available.notify_one();
            }
        }
    }

    /// Retire a slot without replacement, permanently shrinking the pool's
    /// effective capacity by one.
    pub(crate) fn retire(&self, slot: Slot<T>) {
        let mut state = self.state.lock();
        match slot {
            Slot::Live(_) => state.live -= 1,
            Slot::Vacant => state.vacant -= 1,
        }
        drop(state);
        self.dispose(slot);
    }

    fn dispose(&self, slot: Slot<T>) {
        if let Slot::Live(conn) = slot {
            match self.on_dispose.as_ref() {
                Some(dispose) => dispose(conn),
                None => drop(conn),
            }
        }
    }

    pub(crate) fn handle_error(&self, err: E) {
        if let Some(handler) = self.handle_error.as_ref() {
            (handler)(err)
        }
    }

    fn stats(&self) -> PoolStats {
        let state = self.state.lock();
        let idle = state.idle.iter().filter(|slot| slot.is_live()).count();
        PoolStats::new(
            self.capacity,
            state.live,
            idle,
            state.live - idle,
            state.vacant,
            self.waiting.load(Ordering::SeqCst),
        )
    }
}

/// A bounded pool of connections shared across concurrent callers.
///
/// The pool owns every connection it creates; a caller borrows one for the
/// duration of a unit of work through [`Pool::acquire`] and returns it by
/// dropping the guard. Cloning the pool shares the same state; there is no
/// ambient or global instance.
pub struct Pool<T: Send + 'static, E: 'static> {
    pub(crate) inner: Arc<PoolInner<T, E>>,
}

impl<T: Send, E> Pool<T, E> {
    pub(crate) fn new(inner: PoolInner<T, E>) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Remove and return one slot from the idle store, blocking until one
    /// is available.
    ///
    /// A caller can block indefinitely if the pool never regains an idle
    /// slot, e.g. when every connection has been retired through
    /// [`Pooled::close`]. Concurrent callers race for whichever slots
    /// become idle; no FIFO guarantee is made.
    pub fn acquire(&self) -> Pooled<T, E> {
        Pooled::new(self.inner.acquire_slot(), self.inner.clone())
    }

    /// Non-blocking variant of [`Pool::acquire`].
    pub fn try_acquire(&self) -> Option<Pooled<T, E>> {
        self.inner
            .try_acquire_slot()
            .map(|slot| Pooled::new(slot, self.inner.clone()))
    }

    /// Fetch the current number of live connections, idle or held.
    pub fn count(&self) -> usize {
        self.inner.state.lock().live
    }

    /// The fixed maximum number of slots, set at construction.
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// A consistent snapshot of the pool's accounting.
    pub fn stats(&self) -> PoolStats {
        self.inner.stats()
    }

    /// Dispose of all idle connections and mark the pool closed.
    ///
    /// Slots released after this point are disposed instead of re-admitted.
    /// Callers already blocked in `acquire` keep blocking; the pool makes
    /// no timeout or cancellation promise.
    pub fn drain(self) {
        let drained = {
            let mut state = self.inner.state.lock();
            state.closed = true;
            let drained: Vec<_> = state.idle.drain(..).collect();
            for slot in drained.iter() {
                match slot {
                    Slot::Live(_) => state.live -= 1,
                    Slot::Vacant => state.vacant -= 1,
                }
            }
            drained
        };
        debug!(count = drained.len(), "draining idle connections");
        for slot in drained {
            self.inner.dispose(slot);
        }
    }
}

impl<T: Send, E> Clone for Pool<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Send, E> Debug for Pool<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("capacity", &self.capacity())
            .field("count", &self.count())
            .finish()
    }
}
