use crate::config::Calibration;
use crate::types::angle::{Angle, MAX_DEGREES};

/// Linear map of `0..=180` onto `calibration.min..=calibration.max`, truncating.
///
/// A calibration with `min > max` maps downwards, for servos mounted mirrored.
pub fn to_pulse_width(angle: Angle, calibration: &Calibration) -> u16 {
    let (min, max) = (calibration.min as i32, calibration.max as i32);
    let degrees = angle.degrees() as i32;
    (min + (max - min) * degrees / MAX_DEGREES as i32) as u16
}

mod test {
    #[test]
    fn test_to_pulse_width_bounds() {
        use super::to_pulse_width;
        use crate::config::Calibration;
        use crate::types::Angle;

        for calibration in [Calibration::NARROW, Calibration::WIDE] {
            assert_eq!(to_pulse_width(Angle::MIN, &calibration), calibration.min);
            assert_eq!(to_pulse_width(Angle::MAX, &calibration), calibration.max);
            assert_eq!(to_pulse_width(Angle::clamped(-30), &calibration), calibration.min);
            assert_eq!(to_pulse_width(Angle::clamped(270), &calibration), calibration.max);
        }
    }

    #[test]
    fn test_to_pulse_width() {
        use super::to_pulse_width;
        use crate::config::Calibration;
        use crate::types::Angle;

        assert_eq!(to_pulse_width(Angle::clamped(90), &Calibration::NARROW), 340);
        assert_eq!(to_pulse_width(Angle::clamped(90), &Calibration::WIDE), 340);
        assert_eq!(to_pulse_width(Angle::clamped(40), &Calibration::NARROW), 206);
        assert_eq!(to_pulse_width(Angle::clamped(70), &Calibration::WIDE), 282);
    }

    #[test]
    fn test_to_pulse_width_monotonic() {
        use super::to_pulse_width;
        use crate::config::Calibration;
        use crate::types::Angle;

        let calibration = Calibration::NARROW;
        let mut last = 0;
        for degrees in -10..=190 {
            let pulse = to_pulse_width(Angle::clamped(degrees), &calibration);
            assert!(pulse >= last);
            last = pulse;
        }
    }

    #[test]
    fn test_to_pulse_width_reversed() {
        use super::to_pulse_width;
        use crate::config::Calibration;
        use crate::types::Angle;

        let calibration = Calibration { min: 600, max: 80 };
        assert_eq!(to_pulse_width(Angle::MIN, &calibration), 600);
        assert_eq!(to_pulse_width(Angle::clamped(90), &calibration), 340);
        assert_eq!(to_pulse_width(Angle::MAX, &calibration), 80);
    }
}
