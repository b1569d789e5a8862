//! Simulated backend for the benchmark binaries and tests.
//!
//! Stands in for the wire-level database client: connections carry a
//! sequential id, execute an artificial-delay unit of work, and support
//! failure injection (refused opens, severed connections).

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::conn::{ConnectError, Connection, ExecError};

/// A fake backend service shared by every connection it hands out.
#[derive(Default)]
pub struct SimBackend {
    opened: AtomicUsize,
    closed: AtomicUsize,
    executed: AtomicUsize,
    refuse: AtomicBool,
    severed: Mutex<HashSet<usize>>,
}

impl SimBackend {
    /// Open a new connection, verifying liveness with a round-trip ping.
    pub fn connect(self: &Arc<Self>) -> Result<SimConnection, ConnectError> {
        if self.refuse.load(Ordering::SeqCst) {
            return Err(ConnectError::Transport("backend refused connection".into()));
        }
        let id = self.opened.fetch_add(1, Ordering::SeqCst) + 1;
        let conn = SimConnection {
            id,
            backend: self.clone(),
            closed: false,
        };
        conn.ping()?;
        Ok(conn)
    }

    /// Make every subsequent `connect` fail with a transport error.
    pub fn refuse_connections(&self, refuse: bool) {
        self.refuse.store(refuse, Ordering::SeqCst);
    }

    /// Drop the remote end of one connection: every later `execute` on it
    /// reports `ConnectionLost`.
    pub fn sever(&self, id: usize) {
        self.severed.lock().insert(id);
    }

    fn is_severed(&self, id: usize) -> bool {
        self.severed.lock().contains(&id)
    }

    /// Connections opened so far, including ones since closed.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Units of work completed successfully.
    pub fn executed(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }
}

/// One simulated connection. Ids are assigned sequentially from 1.
pub struct SimConnection {
    id: usize,
    backend: Arc<SimBackend>,
    closed: bool,
}

impl SimConnection {
    pub fn id(&self) -> usize {
        self.id
    }

    fn ping(&self) -> Result<(), ConnectError> {
        if self.backend.is_severed(self.id) {
            return Err(ConnectError::Ping("no response from backend".into()));
        }
        Ok(())
    }
}

impl Connection for SimConnection {
    type Op = Duration;

    fn execute(&mut self, op: &Duration) -> Result<(), ExecError> {
        if self.closed {
            return Err(ExecError::Backend("connection is closed".into()));
        }
        if self.backend.is_severed(self.id) {
            return Err(ExecError::ConnectionLost);
        }
        if !op.is_zero() {
            thread::sleep(*op);
        }
        self.backend.executed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.backend.closed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_and_counters() {
        let backend = Arc::new(SimBackend::default());
        let mut fst = backend.connect().unwrap();
        let snd = backend.connect().unwrap();
        assert_eq!(fst.id(), 1);
        assert_eq!(snd.id(), 2);
        assert_eq!(backend.opened(), 2);

        fst.execute(&Duration::ZERO).unwrap();
        assert_eq!(backend.executed(), 1);

        fst.close();
        fst.close();
        assert_eq!(backend.closed(), 1);
    }

    #[test]
    fn severed_connection_keeps_failing() {
        let backend = Arc::new(SimBackend::default());
        let mut conn = backend.connect().unwrap();
        backend.sever(conn.id());
        for _ in 0..3 {
            let err = conn.execute(&Duration::ZERO).unwrap_err();
            assert!(err.is_connection_lost());
        }
        assert_eq!(backend.executed(), 0);
    }

    #[test]
    fn refused_connect() {
        let backend = Arc::new(SimBackend::default());
        backend.refuse_connections(true);
        assert!(backend.connect().is_err());
        backend.refuse_connections(false);
        assert!(backend.connect().is_ok());
    }
}
