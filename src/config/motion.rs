use super::pathset::{Error, Path, PathSet, Value};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Motion {
    /// Minimum milliseconds between two sweep steps
    pub step_interval: u32,
    pub step_degrees: u8,
    /// Mux address line settling time before the shared channel is written
    pub settle_micros: u32,
}

impl Motion {
    /// Degrees per sweep step, a zero step from deserialized config moves by one.
    pub fn step(&self) -> u8 {
        self.step_degrees.max(1)
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self { step_interval: 15, step_degrees: 3, settle_micros: 150 }
    }
}

impl PathSet for Motion {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), Error> {
        let default = Self::default();
        match path.str()? {
            "step-interval" => self.step_interval = value.parse_or(default.step_interval)?,
            "step-degrees" => {
                let step: u8 = value.parse_or(default.step_degrees)?;
                if step == 0 {
                    return Err(Error::InvalidValue);
                }
                self.step_degrees = step
            }
            "settle-micros" => self.settle_micros = value.parse_or(default.settle_micros)?,
            _ => return Err(Error::UnknownPath),
        }
        Ok(())
    }
}
