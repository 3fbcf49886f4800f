//! Visibility-driven lifecycle — wall-clock sync, the 1 Hz ticker policy,
//! and sweep start/stop.
//!
//! The controller never touches platform scheduling itself. The host feeds it
//! the current time, asks for the next deadline, and calls
//! [`service`](FaceController::service) when that deadline passes; winit,
//! a timer wheel, or a test loop can all drive it the same way.

use crate::clock::ClockState;
use crate::sweep::ProgressSweep;
use crate::time::TimeSource;

/// Lifecycle state for one face view: the displayed time, the progress
/// sweep, and the pending ticker deadline.
#[derive(Debug, Default)]
pub struct FaceController {
    clock: ClockState,
    sweep: ProgressSweep,
    visible: bool,
    /// Next ticker fire, in `TimeSource` milliseconds. `None` while hidden.
    next_tick_at: Option<u64>,
    /// Last whole wall-clock second the displayed time accounts for.
    last_whole_second: u64,
}

impl FaceController {
    /// A hidden controller showing 12:00:00.
    pub fn new() -> Self {
        Self::default()
    }

    /// The time currently shown on the face.
    #[must_use]
    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    /// Whether the face is currently visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Apply a visibility change.
    ///
    /// Becoming visible re-syncs the clock from the wall clock, restarts the
    /// sweep phase-locked to the current second, and registers the ticker
    /// with an immediate first fire. Becoming hidden cancels the ticker and
    /// stops the sweep. Both directions are safe to repeat: a second "show"
    /// replaces the running sweep rather than stacking a duplicate driver,
    /// and a second "hide" is a no-op.
    pub fn set_visible<T: TimeSource>(&mut self, visible: bool, time: &T) {
        self.visible = visible;
        if visible {
            let now = time.now_millis();
            self.clock.sync(time.civil_time());
            self.last_whole_second = now / 1000;
            self.sweep.start(self.clock.second(), now);
            self.next_tick_at = Some(now);
        } else {
            self.sweep.stop();
            self.next_tick_at = None;
        }
    }

    /// Run the ticker if its deadline has passed.
    ///
    /// Advances the clock once per wall-clock second that actually elapsed
    /// since the last fire (so the immediate fire right after a sync mutates
    /// nothing, and a stalled host catches up instead of drifting), then
    /// schedules the next fire at the next second boundary:
    /// `now + (1000 − now % 1000)`.
    ///
    /// Returns `true` when the face should be redrawn.
    pub fn service(&mut self, now_ms: u64) -> bool {
        let Some(due) = self.next_tick_at else {
            return false;
        };
        if now_ms < due {
            return false;
        }

        let now_second = now_ms / 1000;
        while self.last_whole_second < now_second {
            self.clock.tick();
            self.last_whole_second += 1;
        }

        self.next_tick_at = Some(now_ms + (1000 - now_ms % 1000));
        true
    }

    /// The next ticker deadline, for the host's wait loop. `None` while
    /// hidden.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.next_tick_at
    }

    /// Current sweep angle in degrees, or `None` while hidden.
    #[must_use]
    pub fn sweep_angle(&self, now_ms: u64) -> Option<f32> {
        self.sweep.angle_degrees(now_ms)
    }
}
