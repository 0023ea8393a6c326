use core::num::IntErrorKind;
use core::str::FromStr;

pub const MAX_DEGREES: u8 = 180;

/// Servo position in whole degrees, always within `0..=180`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i32", into = "u8")]
pub struct Angle(u8);

impl Angle {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(MAX_DEGREES);

    pub fn clamped(degrees: i32) -> Self {
        Self(degrees.clamp(0, MAX_DEGREES as i32) as u8)
    }

    pub fn degrees(self) -> u8 {
        self.0
    }

    pub fn saturating_add(self, degrees: u8) -> Self {
        Self::clamped(self.0 as i32 + degrees as i32)
    }

    pub fn saturating_sub(self, degrees: u8) -> Self {
        Self::clamped(self.0 as i32 - degrees as i32)
    }
}

impl From<i32> for Angle {
    fn from(degrees: i32) -> Self {
        Self::clamped(degrees)
    }
}

impl Into<u8> for Angle {
    fn into(self) -> u8 {
        self.0
    }
}

impl FromStr for Angle {
    type Err = ();

    /// Numbers beyond `i32` saturate like any other out of range angle.
    fn from_str(string: &str) -> Result<Self, ()> {
        match string.parse::<i32>() {
            Ok(degrees) => Ok(Self::clamped(degrees)),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Ok(Self::MAX),
                IntErrorKind::NegOverflow => Ok(Self::MIN),
                _ => Err(()),
            },
        }
    }
}

impl core::fmt::Display for Angle {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}°", self.0)
    }
}

mod test {
    #[test]
    fn test_angle_clamped() {
        use super::Angle;

        assert_eq!(Angle::clamped(-45).degrees(), 0);
        assert_eq!(Angle::clamped(90).degrees(), 90);
        assert_eq!(Angle::clamped(1000).degrees(), 180);
        assert_eq!(Angle::MAX.saturating_add(3), Angle::MAX);
        assert_eq!(Angle::clamped(2).saturating_sub(3), Angle::MIN);
    }

    #[test]
    fn test_angle_from_str() {
        use super::Angle;

        assert_eq!("40".parse::<Angle>(), Ok(Angle::clamped(40)));
        assert_eq!("-10".parse::<Angle>(), Ok(Angle::MIN));
        assert_eq!("ninety".parse::<Angle>(), Err(()));
        assert_eq!("3000000000".parse::<Angle>(), Ok(Angle::MAX));
        assert_eq!("-99999999999".parse::<Angle>(), Ok(Angle::MIN));
    }
}
