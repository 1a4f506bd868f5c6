//! Per-class counting signal.
//!
//! A `ClassSignal` is a counting semaphore with a close flag: posts add
//! permits, waits take one or block until one exists. Once closed, a waiter
//! that finds no permit returns instead of sleeping, which is how stations
//! parked on an idle class learn that production has ended.

use parking_lot::{Condvar, Mutex};

/// Outcome of waiting on a class signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// A permit was taken; a matching vehicle was admitted at some point.
    Signalled,
    /// The signal is closed and holds no permits.
    Closed,
}

/// State protected by the signal mutex.
#[derive(Debug, Default)]
struct SignalState {
    permits: usize,
    closed: bool,
}

/// Counting signal for one fuel class.
#[derive(Debug, Default)]
pub struct ClassSignal {
    state: Mutex<SignalState>,
    condvar: Condvar,
}

impl ClassSignal {
    /// A signal with no permits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one permit and wake one waiter.
    pub fn post(&self) {
        let mut state = self.state.lock();
        state.permits += 1;
        drop(state);
        self.condvar.notify_one();
    }

    /// Block until a permit is available or the signal is closed.
    ///
    /// Remaining permits are still handed out after close; `Closed` is only
    /// returned once they are exhausted.
    pub fn wait(&self) -> Wake {
        let mut state = self.state.lock();
        self.condvar
            .wait_while(&mut state, |s| s.permits == 0 && !s.closed);
        if state.permits > 0 {
            state.permits -= 1;
            Wake::Signalled
        } else {
            Wake::Closed
        }
    }

    /// Take a permit if one is available, without blocking.
    pub fn try_take(&self) -> bool {
        let mut state = self.state.lock();
        if state.permits > 0 {
            state.permits -= 1;
            true
        } else {
            false
        }
    }

    /// Close the signal and wake every waiter.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        drop(state);
        self.condvar.notify_all();
    }

    /// Current number of permits.
    #[must_use]
    pub fn permits(&self) -> usize {
        self.state.lock().permits
    }

    /// True once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}
