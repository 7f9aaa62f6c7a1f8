//! Time source for the service.
//!
//! Domain functions take timestamps as arguments; the service reads the
//! current time through a [`Clock`] so tests can control it.

use std::fmt::Debug;

use chrono::Duration;
use parking_lot::Mutex;

use crate::domain::Timestamp;

/// Provides the current time.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<Timestamp>,
}

impl ManualClock {
    #[must_use]
    pub const fn new(start: Timestamp) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Sets the current time.
    pub fn set(&self, timestamp: Timestamp) {
        *self.current.lock() = timestamp;
    }

    /// Moves the current time forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock();
        *current = current.plus(duration);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.lock()
    }
}
