//! Host clock abstraction.
//!
//! The timelock never measures elapsed time itself. It only compares
//! stored ready timestamps against the reading carried by each call.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::foundation::types::Timestamp;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock in unix seconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Manually driven clock. Never moves backwards.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        ManualClock { now: Cell::new(start) }
    }

    pub fn advance(&self, seconds: u64) {
        self.now.set(self.now.get().saturating_add(seconds));
    }

    /// Jump to `timestamp`. Earlier readings are ignored.
    pub fn set(&self, timestamp: Timestamp) {
        if timestamp > self.now.get() {
            self.now.set(timestamp);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}
