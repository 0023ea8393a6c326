pub mod calibration;
pub mod motion;
pub mod pathset;
pub mod wiring;

pub use calibration::Calibration;
pub use motion::Motion;
pub use pathset::{Path, PathSet, Value};
pub use wiring::{PerBank, Wiring};

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub calibration: Calibration,
    pub motion: Motion,
    pub wiring: Wiring,
}

impl PathSet for Config {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), pathset::Error> {
        match path.str()? {
            "calibration" => self.calibration.set(path, value),
            "motion" => self.motion.set(path, value),
            "wiring" => self.wiring.set(path, value),
            _ => Err(pathset::Error::UnknownPath),
        }
    }
}

mod test {
    #[test]
    fn test_config_path_set() {
        use super::pathset::{apply, Error};
        use super::{Calibration, Config};

        let mut config = Config::default();
        apply(&mut config, "calibration=wide").unwrap();
        assert_eq!(config.calibration, Calibration::WIDE);
        apply(&mut config, "calibration.min = 90").unwrap();
        assert_eq!(config.calibration, Calibration { min: 90, max: 600 });
        apply(&mut config, "calibration").unwrap();
        assert_eq!(config.calibration, Calibration::NARROW);

        apply(&mut config, "motion.step-degrees=5").unwrap();
        assert_eq!(config.motion.step_degrees, 5);
        assert_eq!(apply(&mut config, "motion.step-degrees=0"), Err(Error::InvalidValue));
        apply(&mut config, "motion.step-interval").unwrap();
        assert_eq!(config.motion.step_interval, 15);

        apply(&mut config, "wiring.shared-channels.a=4").unwrap();
        assert_eq!(config.wiring.shared_channels.a, 4);
        assert_eq!(apply(&mut config, "wiring.shared-channels.b=16"), Err(Error::InvalidValue));
        apply(&mut config, "wiring.select-pins.b.s3=12").unwrap();
        assert_eq!(config.wiring.select_pins.b, [6, 7, 8, 12]);
        assert_eq!(apply(&mut config, "wiring.select-pins.b.s3"), Err(Error::ExpectValue));

        assert_eq!(apply(&mut config, "servo.min=1"), Err(Error::UnknownPath));
        assert_eq!(apply(&mut config, "motion.step-degrees=fast"), Err(Error::InvalidValue));
    }

    #[test]
    fn test_config_serde() {
        use super::{Calibration, Config};

        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"step-interval\":15"));
        assert!(json.contains("\"shared-channels\":{\"a\":2,\"b\":3}"));

        let json = r#"{"calibration":{"min":80,"max":600}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.calibration, Calibration::WIDE);
        assert_eq!(config.motion, Default::default());
    }
}
