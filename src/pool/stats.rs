/// A snapshot of a pool's accounting.
///
/// `idle + held` never exceeds `capacity`; `vacant` counts capacity slots
/// occupied by a failed open, whether idle or held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    capacity: usize,
    live: usize,
    idle: usize,
    held: usize,
    vacant: usize,
    waiting: usize,
}

impl PoolStats {
    pub(crate) fn new(
        capacity: usize,
        live: usize,
        idle: usize,
        held: usize,
        vacant: usize,
        waiting: usize,
    ) -> Self {
        Self {
            capacity,
            live,
            idle,
            held,
            vacant,
            waiting,
        }
    }

    /// Fixed maximum number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Live connections in existence, idle or held.
    pub fn live(&self) -> usize {
        self.live
    }

    /// Live connections sitting in the idle store.
    pub fn idle(&self) -> usize {
        self.idle
    }

    /// Live connections currently held by callers.
    pub fn held(&self) -> usize {
        self.held
    }

    /// Capacity slots whose open failed.
    pub fn vacant(&self) -> usize {
        self.vacant
    }

    /// Callers currently blocked in `acquire`.
    pub fn waiting(&self) -> usize {
        self.waiting
    }

    /// Fraction of capacity held by callers, 0.0 to 1.0.
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.held as f64 / self.capacity as f64
        }
    }
}
