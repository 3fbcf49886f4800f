//! Hand rotation angles, in clockwise degrees from the 12 o'clock position.

/// Minute-hand angle: 6° per minute plus a tenth of a degree per second, so
/// the hand creeps between minute marks instead of jumping.
#[must_use]
pub fn minute_hand_angle(minute: u8, second: u8) -> f32 {
    f32::from(minute) * 6.0 + f32::from(second) / 10.0
}

/// Hour-hand angle: 30° per hour, half a degree per minute, and 1/120° per
/// second.
#[must_use]
pub fn hour_hand_angle(hour: u8, minute: u8, second: u8) -> f32 {
    f32::from(hour) * 30.0 + f32::from(minute) / 2.0 + f32::from(second) / 120.0
}

#[cfg(test)]
mod tests {
    use super::{hour_hand_angle, minute_hand_angle};

    #[test]
    fn test_minute_hand_points_down_at_half_past() {
        assert_eq!(minute_hand_angle(30, 0), 180.0);
    }

    #[test]
    fn test_minute_hand_creeps_with_seconds() {
        assert_eq!(minute_hand_angle(0, 30), 3.0);
    }

    #[test]
    fn test_hour_hand_points_down_at_six() {
        assert_eq!(hour_hand_angle(6, 0, 0), 180.0);
    }

    #[test]
    fn test_hour_hand_between_marks() {
        assert_eq!(hour_hand_angle(3, 30, 0), 105.0);
    }

    #[test]
    fn test_hour_hand_second_contribution() {
        assert_eq!(hour_hand_angle(0, 0, 60), 0.5);
    }
}
