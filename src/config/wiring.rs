use super::pathset::{Error, Path, PathSet, Value};
use crate::types::Bank;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerBank<T> {
    pub a: T,
    pub b: T,
}

impl<T: Copy> PerBank<T> {
    pub fn get(&self, bank: Bank) -> T {
        match bank {
            Bank::A => self.a,
            Bank::B => self.b,
        }
    }
}

impl<T> PerBank<T> {
    pub fn get_mut(&mut self, bank: Bank) -> &mut T {
        match bank {
            Bank::A => &mut self.a,
            Bank::B => &mut self.b,
        }
    }
}

/// Board wiring around the PCA9685, the face routing table itself is fixed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Wiring {
    /// PCA9685 channel feeding the common pin of each mux
    pub shared_channels: PerBank<u8>,
    /// GPIO numbers of S0..S3 for each mux
    pub select_pins: PerBank<[u8; 4]>,
}

impl Default for Wiring {
    fn default() -> Self {
        Self {
            shared_channels: PerBank { a: 2, b: 3 },
            select_pins: PerBank { a: [2, 3, 4, 5], b: [6, 7, 8, 9] },
        }
    }
}

fn pca9685_channel(value: Value, or: u8) -> Result<u8, Error> {
    match value.parse_or(or)? {
        channel if channel < 16 => Ok(channel),
        _ => Err(Error::InvalidValue),
    }
}

impl PathSet for Wiring {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), Error> {
        let default = Self::default();
        match path.str()? {
            "shared-channels" => match path.str()? {
                "a" => self.shared_channels.a = pca9685_channel(value, default.shared_channels.a)?,
                "b" => self.shared_channels.b = pca9685_channel(value, default.shared_channels.b)?,
                _ => return Err(Error::UnknownPath),
            },
            "select-pins" => {
                let pins = match path.str()? {
                    "a" => &mut self.select_pins.a,
                    "b" => &mut self.select_pins.b,
                    _ => return Err(Error::UnknownPath),
                };
                let index = match path.str()? {
                    "s0" => 0,
                    "s1" => 1,
                    "s2" => 2,
                    "s3" => 3,
                    _ => return Err(Error::UnknownPath),
                };
                pins[index] = value.parse()?;
            }
            _ => return Err(Error::UnknownPath),
        }
        Ok(())
    }
}
