use std::time::Instant;

/// Monotonic millisecond clock. The epoch is process start and otherwise
/// arbitrary; callers only ever subtract readings, never interpret absolutes.
pub struct Clock {
    epoch: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }

    pub fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
