use std::cell::Cell;
use std::time::Instant;

/// Clock read once per frame to advance the draw timers.
///
/// Readings are microseconds since the clock was created and never go
/// backwards.
pub trait TimeSource {
    fn now_us(&self) -> i64;
}

/// Wall clock for a live session, zeroed when the session starts.
pub struct SessionClock {
    started: Instant,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl TimeSource for SessionClock {
    fn now_us(&self) -> i64 {
        i64::try_from(self.started.elapsed().as_micros()).unwrap_or(i64::MAX)
    }
}

/// Hand-stepped clock for driving a session frame by frame.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_us: Cell<i64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_us(&self, delta_us: i64) {
        self.now_us.set(self.now_us.get() + delta_us);
    }

    pub fn advance_ms(&self, delta_ms: i64) {
        self.advance_us(delta_ms * 1000);
    }
}

impl TimeSource for ManualClock {
    fn now_us(&self) -> i64 {
        self.now_us.get()
    }
}
