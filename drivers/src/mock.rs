use core::convert::Infallible;
use std::vec::Vec;

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::blocking::i2c::{Write, WriteRead};
use embedded_hal::digital::v2::OutputPin;

#[derive(Debug, PartialEq)]
pub struct BusError;

/// Records every write attempt as (address, bytes), failing them all when `fail` is set.
#[derive(Default)]
pub struct I2c {
    pub writes: Vec<(u8, Vec<u8>)>,
    pub fail: bool,
}

impl I2c {
    pub fn registers(&self) -> Vec<u8> {
        self.writes.iter().map(|(_, bytes)| bytes[0]).collect()
    }
}

impl Write for I2c {
    type Error = BusError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), BusError> {
        self.writes.push((address, bytes.to_vec()));
        match self.fail {
            true => Err(BusError),
            false => Ok(()),
        }
    }
}

impl WriteRead for I2c {
    type Error = BusError;

    fn write_read(&mut self, _: u8, _: &[u8], buffer: &mut [u8]) -> Result<(), BusError> {
        buffer.fill(0);
        match self.fail {
            true => Err(BusError),
            false => Ok(()),
        }
    }
}

pub struct Pin;

impl OutputPin for Pin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

#[derive(Default)]
pub struct Delay {
    pub micros: u32,
    pub millis: u32,
}

impl DelayUs<u32> for Delay {
    fn delay_us(&mut self, us: u32) {
        self.micros += us
    }
}

impl DelayMs<u32> for Delay {
    fn delay_ms(&mut self, ms: u32) {
        self.millis += ms
    }
}
