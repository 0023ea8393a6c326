use core::fmt::Debug;

use embedded_hal::blocking::i2c::{Write, WriteRead};
use fugit::HertzU32;
use hal::pwm::{PulseSink, SERVO_FREQUENCY};
use pwm_pca9685::{Address, Channel, Error, Pca9685};

const OSCILLATOR_HZ: u32 = 25_000_000;
const STEPS: u32 = 4096;

/// PRE_SCALE register value for `frequency`, rounded as in the datasheet.
pub fn prescale(frequency: HertzU32) -> u8 {
    let divider = STEPS * frequency.raw();
    let prescale = ((OSCILLATOR_HZ + divider / 2) / divider).saturating_sub(1);
    prescale.clamp(3, u8::MAX as u32) as u8
}

pub fn channel(index: u8) -> Option<Channel> {
    let channel = match index {
        0 => Channel::C0,
        1 => Channel::C1,
        2 => Channel::C2,
        3 => Channel::C3,
        4 => Channel::C4,
        5 => Channel::C5,
        6 => Channel::C6,
        7 => Channel::C7,
        8 => Channel::C8,
        9 => Channel::C9,
        10 => Channel::C10,
        11 => Channel::C11,
        12 => Channel::C12,
        13 => Channel::C13,
        14 => Channel::C14,
        15 => Channel::C15,
        _ => return None,
    };
    Some(channel)
}

pub struct Pca9685Sink<I2C> {
    pca9685: Pca9685<I2C>,
}

impl<I2C, E> Pca9685Sink<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    E: Debug,
{
    pub fn new(i2c: I2C) -> Result<Self, Error<E>> {
        let pca9685 = Pca9685::new(i2c, Address::default())?;
        info!("PCA9685 attached");
        Ok(Self { pca9685 })
    }

    pub fn release(self) -> I2C {
        self.pca9685.destroy()
    }
}

impl<I2C, E> PulseSink for Pca9685Sink<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    E: Debug,
{
    fn init(&mut self) {
        if let Err(e) = self.pca9685.set_prescale(prescale(SERVO_FREQUENCY)) {
            warn!("PCA9685 set prescale err: {:?}", e);
        }
        if let Err(e) = self.pca9685.enable() {
            warn!("PCA9685 enable err: {:?}", e);
        }
    }

    fn drive_pulse(&mut self, index: u8, pulse: u16) {
        let channel = match channel(index) {
            Some(channel) => channel,
            None => {
                warn!("No PCA9685 channel {}", index);
                return;
            }
        };
        if let Err(e) = self.pca9685.set_channel_on_off(channel, 0, pulse) {
            warn!("PCA9685 channel {} write err: {:?}", index, e);
        }
    }
}

mod test {
    #[test]
    fn test_prescale() {
        use fugit::HertzU32;

        use super::prescale;

        assert_eq!(prescale(hal::pwm::SERVO_FREQUENCY), 121);
        assert_eq!(prescale(HertzU32::from_raw(1526)), 3);
        assert_eq!(prescale(HertzU32::from_raw(24)), 253);
        assert_eq!(prescale(HertzU32::from_raw(20_000)), 3);
    }

    #[test]
    fn test_channel() {
        use super::channel;

        assert!((0..16).all(|index| channel(index).is_some()));
        assert!(channel(16).is_none());
    }

    #[cfg(test)]
    fn sink(fail: bool) -> super::Pca9685Sink<crate::mock::I2c> {
        let i2c = crate::mock::I2c { fail, ..Default::default() };
        super::Pca9685Sink::new(i2c).unwrap()
    }

    #[test]
    fn test_init_sets_prescale_then_wakes() {
        use hal::pwm::PulseSink;

        let mut sink = sink(false);
        sink.init();
        let i2c = sink.release();
        let prescale = i2c.writes.iter().position(|w| w == &(0x40, [0xFE, 121].to_vec()));
        let (address, mode1) = i2c.writes.last().unwrap();
        assert_eq!(*address, 0x40);
        assert_eq!(mode1[0], 0x00);
        assert_eq!(mode1[1] & 0x10, 0, "oscillator still asleep");
        assert!(prescale.unwrap() < i2c.writes.len() - 1);
    }

    #[test]
    fn test_drive_pulse() {
        use hal::pwm::PulseSink;

        let mut sink = sink(false);
        sink.drive_pulse(0, 100);
        sink.drive_pulse(2, 286);
        sink.drive_pulse(15, 4095);
        let i2c = sink.release();
        let count = i2c.writes.len();
        let expected = [
            (0x40, [0x06, 0, 0, 100, 0].to_vec()),
            (0x40, [0x0E, 0, 0, 0x1E, 0x01].to_vec()),
            (0x40, [0x42, 0, 0, 0xFF, 0x0F].to_vec()),
        ];
        assert_eq!(&i2c.writes[count - 3..], &expected);
    }

    #[test]
    fn test_drive_pulse_unknown_channel() {
        use hal::pwm::PulseSink;

        let mut sink = sink(false);
        sink.drive_pulse(16, 300);
        assert!(sink.release().writes.is_empty());
    }

    #[test]
    fn test_bus_errors_are_swallowed() {
        use hal::pwm::PulseSink;

        let mut sink = sink(true);
        sink.init();
        sink.drive_pulse(0, 100);
        sink.drive_pulse(1, 100);
        let i2c = sink.release();
        assert!(i2c.registers().contains(&0xFE));
        assert!(i2c.writes.len() >= 3);
    }
}
