//! Progress-indicator sweep — a repeating linear phase over a two-minute
//! cycle, phase-locked to the second at which it was started.
//!
//! The phase is tracked in integer milliseconds within the cycle so no float
//! error can accumulate across wraps; it is converted to degrees only when
//! sampled.

/// Length of one full sweep cycle (−360° to +360°) in milliseconds.
pub const SWEEP_PERIOD_MS: u64 = 120_000;

#[derive(Debug, Clone, Copy)]
struct SweepRun {
    /// Timestamp at which the run was started.
    started_at: u64,
    /// Phase offset into the cycle at `started_at`, `0..SWEEP_PERIOD_MS`.
    offset_ms: u64,
}

/// The looping progress sweep. Stopped until started; a restart replaces any
/// previous run so there is never more than one driver.
#[derive(Debug, Default)]
pub struct ProgressSweep {
    run: Option<SweepRun>,
}

impl ProgressSweep {
    /// A stopped sweep.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the sweep, phase-locked to `second`.
    ///
    /// The starting phase is `60_000 + second * 1_000` ms into the cycle
    /// (the fraction `0.5 * (second / 60) + 0.5`), so at second 0 the
    /// visible arc begins a fresh sweep and at second 59 it is nearly
    /// complete. Any run already in progress is replaced.
    pub fn start(&mut self, second: u8, now_ms: u64) {
        let offset_ms = 60_000 + u64::from(second.min(59)) * 1_000;
        self.run = Some(SweepRun {
            started_at: now_ms,
            offset_ms,
        });
    }

    /// Stop the sweep. A no-op when never started or already stopped.
    pub fn stop(&mut self) {
        self.run = None;
    }

    /// Whether a run is in progress.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Position within the cycle as a fraction in `[0, 1)`, or `None` when
    /// stopped.
    #[must_use]
    pub fn fraction(&self, now_ms: u64) -> Option<f32> {
        let run = self.run?;
        let elapsed = now_ms.saturating_sub(run.started_at);
        let pos = (run.offset_ms + elapsed) % SWEEP_PERIOD_MS;
        Some(pos as f32 / SWEEP_PERIOD_MS as f32)
    }

    /// Current sweep angle in degrees, in `[-360, 360)`, or `None` when
    /// stopped.
    ///
    /// The angle grows linearly from −360° to +360° over one cycle and wraps
    /// indefinitely. Sampled at whatever cadence the host redraws.
    #[must_use]
    pub fn angle_degrees(&self, now_ms: u64) -> Option<f32> {
        self.fraction(now_ms).map(|f| -360.0 + 720.0 * f)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::{ProgressSweep, SWEEP_PERIOD_MS};

    #[test]
    fn test_stopped_sweep_has_no_angle() {
        let sweep = ProgressSweep::new();
        assert!(!sweep.is_running());
        assert_eq!(sweep.angle_degrees(1_000), None);
    }

    #[test]
    fn test_stop_without_start_is_noop() {
        let mut sweep = ProgressSweep::new();
        sweep.stop();
        sweep.stop();
        assert!(!sweep.is_running());
    }

    #[test]
    fn test_start_fraction_matches_phase_formula() {
        // Starting fraction must equal 0.5 * (second / 60) + 0.5.
        for second in 0..60u8 {
            let mut sweep = ProgressSweep::new();
            sweep.start(second, 7_777);
            let expected = 0.5 * (f32::from(second) / 60.0) + 0.5;
            let got = sweep.fraction(7_777).unwrap();
            assert!(
                (got - expected).abs() < 1e-6,
                "second {second}: expected {expected}, got {got}"
            );
        }
    }

    #[test]
    fn test_angle_at_second_zero_is_fresh_sweep() {
        let mut sweep = ProgressSweep::new();
        sweep.start(0, 0);
        assert_eq!(sweep.angle_degrees(0), Some(0.0));
    }

    #[test]
    fn test_angle_near_end_of_minute() {
        let mut sweep = ProgressSweep::new();
        sweep.start(59, 0);
        // 119/120 of the cycle: 6 degrees short of the full +360.
        let angle = sweep.angle_degrees(0).unwrap();
        assert!((angle - 354.0).abs() < 1e-3, "got {angle}");
    }

    #[test]
    fn test_linear_advance_and_wrap() {
        let mut sweep = ProgressSweep::new();
        sweep.start(0, 1_000);

        // Half a cycle later the angle has advanced by 360 degrees and
        // wrapped back through -360.
        let half = sweep.angle_degrees(1_000 + SWEEP_PERIOD_MS / 2).unwrap();
        assert!((half - (-360.0)).abs() < 1e-3, "got {half}");

        // A whole cycle returns to the starting angle.
        let full = sweep.angle_degrees(1_000 + SWEEP_PERIOD_MS).unwrap();
        assert!((full - 0.0).abs() < 1e-3, "got {full}");
    }

    #[test]
    fn test_restart_replaces_previous_run() {
        let mut sweep = ProgressSweep::new();
        sweep.start(10, 0);
        sweep.start(30, 5_000);

        // Only the second run's phase is observable.
        let expected = 0.5 * (30.0 / 60.0) + 0.5;
        let got = sweep.fraction(5_000).unwrap();
        assert!((got - expected).abs() < 1e-6, "got {got}");
    }

    #[test]
    fn test_angle_stays_in_range_over_many_cycles() {
        let mut sweep = ProgressSweep::new();
        sweep.start(37, 0);
        for step in 0..5_000u64 {
            let angle = sweep.angle_degrees(step * 97).unwrap();
            assert!((-360.0..360.0).contains(&angle), "step {step}: {angle}");
        }
    }
}
