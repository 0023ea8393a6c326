use core::str::FromStr;

use super::pathset::{Error, Path, PathSet, Value};

/// PCA9685 off-ticks at 0° and 180°.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calibration {
    pub min: u16,
    pub max: u16,
}

impl Calibration {
    /// SunFounder digital servo, conservative end stops.
    pub const NARROW: Self = Self { min: 100, max: 580 };
    /// SunFounder servo on the controller board, full travel.
    pub const WIDE: Self = Self { min: 80, max: 600 };
}

impl Default for Calibration {
    fn default() -> Self {
        Self::NARROW
    }
}

impl FromStr for Calibration {
    type Err = ();

    fn from_str(string: &str) -> Result<Self, ()> {
        match string {
            "narrow" => Ok(Self::NARROW),
            "wide" => Ok(Self::WIDE),
            _ => {
                let (min, max) = string.split_once(',').ok_or(())?;
                let min = min.trim().parse().map_err(|_| ())?;
                let max = max.trim().parse().map_err(|_| ())?;
                Ok(Self { min, max })
            }
        }
    }
}

impl PathSet for Calibration {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), Error> {
        if path.is_end() {
            *self = value.parse_or(Self::default())?;
            return Ok(());
        }
        match path.str()? {
            "min" => self.min = value.parse_or(Self::default().min)?,
            "max" => self.max = value.parse_or(Self::default().max)?,
            _ => return Err(Error::UnknownPath),
        }
        Ok(())
    }
}

mod test {
    #[test]
    fn test_calibration_from_str() {
        use super::Calibration;

        assert_eq!("narrow".parse::<Calibration>(), Ok(Calibration::NARROW));
        assert_eq!("wide".parse::<Calibration>(), Ok(Calibration::WIDE));
        assert_eq!("90, 610".parse::<Calibration>(), Ok(Calibration { min: 90, max: 610 }));
        assert_eq!("medium".parse::<Calibration>(), Err(()));
    }
}
