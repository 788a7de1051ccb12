use crate::domain::ports::Clock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall clock backed by `SystemTime`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A clock that returns a set instant and advances one millisecond per read.
#[derive(Debug)]
pub struct SteppingClock {
    next: AtomicU64,
}

impl SteppingClock {
    pub fn starting_at(millis: u64) -> Self {
        Self {
            next: AtomicU64::new(millis),
        }
    }
}

impl Clock for SteppingClock {
    fn now_millis(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}
