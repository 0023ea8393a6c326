use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

use crate::types::Bank;

pub const MAX_CHANNEL: u8 = 15;

/// Address lines S0..S3 of both 16-way multiplexers.
///
/// The selector keeps no record of the selected line: every `select` drives
/// all four lines of the bank again.
pub struct MuxSelector<P> {
    a: [P; 4],
    b: [P; 4],
    settle_micros: u32,
}

impl<P: OutputPin> MuxSelector<P> {
    pub fn new(a: [P; 4], b: [P; 4], settle_micros: u32) -> Self {
        Self { a, b, settle_micros }
    }

    pub fn set_settle_micros(&mut self, micros: u32) {
        self.settle_micros = micros;
    }

    /// Route `bank`'s common pin to `channel` and wait for the switch to settle.
    ///
    /// Returns false without touching any line when `channel` is beyond 15,
    /// the caller must not write the shared channel then.
    pub fn select(&mut self, bank: Bank, channel: u8, delay: &mut impl DelayUs<u32>) -> bool {
        if channel > MAX_CHANNEL {
            return false;
        }
        let lines = match bank {
            Bank::A => &mut self.a,
            Bank::B => &mut self.b,
        };
        for (bit, line) in lines.iter_mut().enumerate() {
            match (channel >> bit) & 1 {
                1 => line.set_high().ok(),
                _ => line.set_low().ok(),
            };
        }
        delay.delay_us(self.settle_micros);
        true
    }
}

mod test {
    #[test]
    fn test_select_lines() {
        use super::MuxSelector;
        use crate::mock::{Bus, Delay, Event::*};
        use crate::types::Bank;

        let bus = Bus::default();
        let mut delay = Delay(bus.clone());
        let mut mux = MuxSelector::new(bus.pins([2, 3, 4, 5]), bus.pins([6, 7, 8, 9]), 150);

        assert!(mux.select(Bank::A, 9, &mut delay));
        let expected = [
            Line(2, true),
            Line(3, false),
            Line(4, false),
            Line(5, true),
            DelayMicros(150),
        ];
        assert_eq!(bus.take(), expected);

        assert!(mux.select(Bank::B, 6, &mut delay));
        let expected = [
            Line(6, false),
            Line(7, true),
            Line(8, true),
            Line(9, false),
            DelayMicros(150),
        ];
        assert_eq!(bus.take(), expected);
    }

    #[test]
    fn test_select_out_of_range() {
        use super::MuxSelector;
        use crate::mock::{Bus, Delay};
        use crate::types::Bank;

        let bus = Bus::default();
        let mut delay = Delay(bus.clone());
        let mut mux = MuxSelector::new(bus.pins([2, 3, 4, 5]), bus.pins([6, 7, 8, 9]), 150);

        assert!(!mux.select(Bank::A, 16, &mut delay));
        assert!(!mux.select(Bank::B, u8::MAX, &mut delay));
        assert!(bus.take().is_empty());
        assert!(mux.select(Bank::B, 15, &mut delay));
        assert_eq!(bus.take().len(), 5);
    }
}
