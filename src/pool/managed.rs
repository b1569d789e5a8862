use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use super::pool::{PoolInner, Slot};

/// A capacity slot borrowed from a [`Pool`](super::Pool).
///
/// Exactly one caller holds a given slot at any instant. Dropping the guard
/// re-admits the slot to the idle store unconditionally — including a slot
/// whose connection just failed — unless the caller flagged it broken and
/// the pool was configured to replace broken connections.
pub struct Pooled<T: Send + 'static, E: 'static> {
    slot: Option<Slot<T>>,
    inner: Option<Arc<PoolInner<T, E>>>,
    broken: bool,
}

impl<T: Send, E> Pooled<T, E> {
    pub(crate) fn new(slot: Slot<T>, inner: Arc<PoolInner<T, E>>) -> Self {
        Self {
            slot: Some(slot),
            inner: Some(inner),
            broken: false,
        }
    }

    /// The live connection in this slot, or `None` for a slot whose open
    /// failed.
    pub fn get(&self) -> Option<&T> {
        match self.slot.as_ref() {
            Some(Slot::Live(conn)) => Some(conn),
            _ => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self.slot.as_mut() {
            Some(Slot::Live(conn)) => Some(conn),
            _ => None,
        }
    }

    /// Whether this slot holds no usable connection.
    pub fn is_vacant(&self) -> bool {
        self.get().is_none()
    }

    /// Signal that the connection was found unusable during a unit of work.
    ///
    /// The pool acts on the signal at release time, per its configured
    /// policy; with replacement disabled the flag is inert and the
    /// connection is re-admitted blindly.
    pub fn flag_broken(&mut self) {
        self.broken = true;
    }

    /// Retire the slot from circulation entirely.
    ///
    /// The connection is disposed and the slot is not returned to the idle
    /// store: the pool's live count decreases by one and never recovers.
    pub fn close(mut self) {
        if let (Some(slot), Some(inner)) = (self.slot.take(), self.inner.take()) {
            inner.retire(slot);
        }
    }
}

impl<T: Send + Debug, E> Debug for Pooled<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pooled")
            .field("conn", &self.get())
            .field("broken", &self.broken)
            .finish()
    }
}

impl<T: Send, E> Drop for Pooled<T, E> {
    fn drop(&mut self) {
        if let (Some(slot), Some(inner)) = (self.slot.take(), self.inner.take()) {
            if self.broken {
                inner.release_broken(slot);
            } else {
                inner.release(slot);
            }
        }
    }
}
