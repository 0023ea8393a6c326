#![no_std]

extern crate hal;
#[macro_use]
extern crate log;
extern crate servo_faces;
#[cfg(test)]
extern crate std;

pub mod clock;
pub mod delay;
pub mod pca9685;

#[cfg(test)]
mod mock;

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::blocking::i2c::{Write, WriteRead};
use embedded_hal::digital::v2::OutputPin;
use servo_faces::config::Config;
use servo_faces::mux::MuxSelector;
use servo_faces::output::Outputs;

/// Bring up the PCA9685 at its default address and wrap it with both muxes.
pub fn servo_outputs<I2C, E, P, D>(
    i2c: I2C,
    select_a: [P; 4],
    select_b: [P; 4],
    delay: D,
    config: &Config,
) -> Result<Outputs<pca9685::Pca9685Sink<I2C>, P, D>, pwm_pca9685::Error<E>>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    E: core::fmt::Debug,
    P: OutputPin,
    D: DelayUs<u32> + DelayMs<u32>,
{
    let sink = pca9685::Pca9685Sink::new(i2c)?;
    let mux = MuxSelector::new(select_a, select_b, config.motion.settle_micros);
    let mut outputs = Outputs::new(sink, mux, delay, config);
    outputs.init();
    Ok(outputs)
}

mod test {
    #[test]
    fn test_servo_outputs() {
        use servo_faces::config::Config;
        use servo_faces::output::Output;
        use servo_faces::types::{Angle, Bank, OutputPath};

        use super::servo_outputs;
        use crate::mock::{Delay, I2c, Pin};

        let config = Config::default();
        let pins = || [Pin, Pin, Pin, Pin];
        let i2c = I2c::default();
        let mut outputs = servo_outputs(i2c, pins(), pins(), Delay::default(), &config).unwrap();
        outputs.write(OutputPath::Direct(0), Angle::MIN);
        outputs.write(OutputPath::Mux(Bank::B, 9), Angle::MAX);

        let (sink, _, delay) = outputs.release();
        assert_eq!(delay.millis, 20);
        assert_eq!(delay.micros, 150);
        let i2c = sink.release();
        assert!(i2c.writes.contains(&(0x40, [0xFE, 121].to_vec())));
        let last = i2c.writes.len() - 2;
        assert_eq!(i2c.writes[last], (0x40, [0x06, 0, 0, 100, 0].to_vec()));
        // 580 ticks on the bank B shared channel 3
        assert_eq!(i2c.writes[last + 1], (0x40, [0x12, 0, 0, 0x44, 0x02].to_vec()));
    }
}
