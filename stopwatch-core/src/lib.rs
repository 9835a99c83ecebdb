//! Pure stopwatch logic library with no platform dependencies.
//! Testable on host without a terminal or a real clock.

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SwState {
    Stopped,
    Running,
    Paused,
}

/// Elapsed-time accumulator. Time never flows inside this type: every
/// operation takes the caller's monotonic clock reading, so the machine is
/// driven entirely by `now_ms` deltas and stays deterministic under test.
pub struct Stopwatch {
    pub state: SwState,
    accumulated_ms: u64,
    segment_start_ms: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            state: SwState::Stopped,
            accumulated_ms: 0,
            segment_start_ms: 0,
        }
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.state == SwState::Running {
            return;
        }
        self.segment_start_ms = now_ms;
        self.state = SwState::Running;
    }

    pub fn pause(&mut self, now_ms: u64) {
        if self.state != SwState::Running {
            return;
        }
        self.accumulated_ms += now_ms.saturating_sub(self.segment_start_ms);
        self.state = SwState::Paused;
    }

    /// Back to zero, discarding any in-progress running segment.
    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
        self.segment_start_ms = 0;
        self.state = SwState::Stopped;
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.state {
            SwState::Running => {
                self.accumulated_ms + now_ms.saturating_sub(self.segment_start_ms)
            }
            _ => self.accumulated_ms,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == SwState::Running
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// One recorded checkpoint: split since the previous checkpoint plus the
/// cumulative total at the moment of recording. Immutable once created.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LapEntry {
    /// 1-based, strictly increasing, never reused until the ledger is cleared.
    pub index: u32,
    /// Signed: a lap recorded after the clock was reset sits below the
    /// previous total, and the split says so rather than clamping.
    pub lap_ms: i64,
    pub total_ms: u64,
}

/// Ordered collection of recorded laps, oldest first. Splits always
/// partition the total exactly: summing `lap_ms` over all entries yields the
/// last entry's `total_ms`.
#[derive(Default)]
pub struct LapLedger {
    entries: Vec<LapEntry>,
}

impl LapLedger {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Records a checkpoint at `elapsed_now`. Legal regardless of stopwatch
    /// state; a zero-length or negative lap is a valid entry, not an error.
    pub fn record(&mut self, elapsed_now: u64) -> LapEntry {
        let prev_total = self.entries.last().map_or(0, |e| e.total_ms);
        let entry = LapEntry {
            index: self.entries.len() as u32 + 1,
            lap_ms: elapsed_now as i64 - prev_total as i64,
            total_ms: elapsed_now,
        };
        self.entries.push(entry);
        entry
    }

    /// Wholesale clear; the next `record` restarts indexing at 1 and
    /// computes its split against an empty ledger.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[LapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Format a millisecond duration as "MM:SS.mmm", with an "HH:" prefix only
/// when the duration reaches a full hour. Negative input keeps a leading
/// sign and formats the magnitude.
pub fn format_clock(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let ms = ms.unsigned_abs();
    let h = ms / 3_600_000;
    let m = (ms % 3_600_000) / 60_000;
    let s = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;
    if h > 0 {
        format!("{}{:02}:{:02}:{:02}.{:03}", sign, h, m, s, millis)
    } else {
        format!("{}{:02}:{:02}.{:03}", sign, m, s, millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_basic() {
        let mut sw = Stopwatch::new();
        assert_eq!(sw.state, SwState::Stopped);
        assert_eq!(sw.elapsed_ms(0), 0);

        sw.start(0);
        assert_eq!(sw.state, SwState::Running);
        assert_eq!(sw.elapsed_ms(1500), 1500);

        sw.pause(1500);
        assert_eq!(sw.state, SwState::Paused);
        assert_eq!(sw.elapsed_ms(4000), 1500); // No accrual while paused

        sw.start(5000);
        sw.pause(5200);
        assert_eq!(sw.elapsed_ms(9999), 1700);
    }

    #[test]
    fn test_redundant_transitions_are_noops() {
        let mut sw = Stopwatch::new();

        // Pausing while idle changes nothing
        sw.pause(100);
        assert_eq!(sw.state, SwState::Stopped);
        assert_eq!(sw.elapsed_ms(100), 0);

        // Starting while running keeps the original segment start
        sw.start(1000);
        sw.start(2000);
        assert_eq!(sw.elapsed_ms(3000), 2000);
    }

    #[test]
    fn test_reset_always_yields_zero() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.pause(800);
        sw.reset();
        assert_eq!(sw.state, SwState::Stopped);
        assert_eq!(sw.elapsed_ms(5000), 0);

        // Reset mid-run discards the in-progress segment too
        sw.start(6000);
        sw.reset();
        assert_eq!(sw.elapsed_ms(9000), 0);
    }

    #[test]
    fn test_lap_splits_partition_total() {
        let mut laps = LapLedger::new();
        let e1 = laps.record(5000);
        assert_eq!(e1.index, 1);
        assert_eq!(e1.lap_ms, 5000);
        assert_eq!(e1.total_ms, 5000);

        let e2 = laps.record(8000);
        assert_eq!(e2.index, 2);
        assert_eq!(e2.lap_ms, 3000);

        let e3 = laps.record(8000); // Zero-length lap is allowed
        assert_eq!(e3.lap_ms, 0);

        let sum: i64 = laps.entries().iter().map(|e| e.lap_ms).sum();
        assert_eq!(sum, laps.entries().last().unwrap().total_ms as i64);
    }

    #[test]
    fn test_lap_after_reset_has_negative_split() {
        let mut sw = Stopwatch::new();
        let mut laps = LapLedger::new();

        sw.start(0);
        laps.record(sw.elapsed_ms(5000));
        sw.reset();

        // The clock dropped below the previous total; the split is the
        // exact signed delta, and the partition still sums to the total.
        sw.start(5000);
        let entry = laps.record(sw.elapsed_ms(5100));
        assert_eq!(entry.lap_ms, -4900);
        assert_eq!(entry.total_ms, 100);

        let sum: i64 = laps.entries().iter().map(|e| e.lap_ms).sum();
        assert_eq!(sum, laps.entries().last().unwrap().total_ms as i64);
    }

    #[test]
    fn test_clear_restarts_indexing() {
        let mut laps = LapLedger::new();
        laps.record(1000);
        laps.record(2500);
        laps.clear();
        assert!(laps.is_empty());

        let entry = laps.record(400);
        assert_eq!(entry.index, 1);
        assert_eq!(entry.lap_ms, 400);
        assert_eq!(entry.total_ms, 400);
        assert_eq!(laps.len(), 1);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00.000");
        assert_eq!(format_clock(500), "00:00.500");
        assert_eq!(format_clock(61_000), "01:01.000");
        assert_eq!(format_clock(3_661_000), "01:01:01.000");
        assert_eq!(format_clock(-500), "-00:00.500");
        assert_eq!(format_clock(-3_600_000), "-01:00:00.000");
    }
}
