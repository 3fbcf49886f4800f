//! System wall clock behind the core's `TimeSource` seam.

use face_core::time::{CivilTime, TimeSource};

/// Reads the local system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClock;

impl TimeSource for WallClock {
    fn civil_time(&self) -> CivilTime {
        let now = jiff::Zoned::now();
        CivilTime {
            hour: u8::try_from(now.hour()).unwrap_or(0),
            minute: u8::try_from(now.minute()).unwrap_or(0),
            second: u8::try_from(now.second()).unwrap_or(0),
        }
    }

    fn now_millis(&self) -> u64 {
        // Unix epoch milliseconds; negative only before 1970.
        u64::try_from(jiff::Timestamp::now().as_millisecond()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::WallClock;
    use face_core::time::TimeSource;

    #[test]
    fn civil_time_is_in_range() {
        let t = WallClock.civil_time();
        assert!(t.hour < 24);
        assert!(t.minute < 60);
        assert!(t.second < 60);
    }

    #[test]
    fn millis_and_civil_seconds_agree() {
        let clock = WallClock;
        let ms = clock.now_millis();
        let civil = clock.civil_time();
        // Re-reading within the same second almost always; allow one step.
        let again = clock.now_millis();
        assert!(again >= ms);
        assert!(u64::from(civil.second) < 60);
    }
}
