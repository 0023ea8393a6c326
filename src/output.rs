use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::OutputPin;
use hal::pwm::PulseSink;

use crate::config::{Calibration, Config, PerBank};
use crate::mux::MuxSelector;
use crate::servo::to_pulse_width;
use crate::types::{Angle, OutputPath};

/// Servos draw a current spike right after the oscillator starts.
pub const POWER_UP_SETTLE_MILLIS: u32 = 20;

/// Anything that can put a face at an angle once its path is resolved.
pub trait Output {
    fn write(&mut self, path: OutputPath, angle: Angle);

    /// Picks up calibration, wiring and settle time changes.
    fn reconfigure(&mut self, _config: &Config) {}
}

impl<O: Output + ?Sized> Output for &mut O {
    fn write(&mut self, path: OutputPath, angle: Angle) {
        (**self).write(path, angle)
    }

    fn reconfigure(&mut self, config: &Config) {
        (**self).reconfigure(config)
    }
}

/// The hardware context, built once at startup and lent to the scheduler.
pub struct Outputs<S, P, D> {
    sink: S,
    mux: MuxSelector<P>,
    delay: D,
    calibration: Calibration,
    shared_channels: PerBank<u8>,
}

impl<S, P, D> Outputs<S, P, D>
where
    S: PulseSink,
    P: OutputPin,
    D: DelayUs<u32> + DelayMs<u32>,
{
    pub fn new(sink: S, mux: MuxSelector<P>, delay: D, config: &Config) -> Self {
        let mut outputs = Self {
            sink,
            mux,
            delay,
            calibration: config.calibration,
            shared_channels: config.wiring.shared_channels,
        };
        outputs.reconfigure(config);
        outputs
    }

    pub fn init(&mut self) {
        self.sink.init();
        self.delay.delay_ms(POWER_UP_SETTLE_MILLIS);
        let Calibration { min, max } = self.calibration;
        info!("Servo outputs ready, calibration {}..{}", min, max);
    }

    pub fn release(self) -> (S, MuxSelector<P>, D) {
        (self.sink, self.mux, self.delay)
    }
}

impl<S, P, D> Output for Outputs<S, P, D>
where
    S: PulseSink,
    P: OutputPin,
    D: DelayUs<u32> + DelayMs<u32>,
{
    fn write(&mut self, path: OutputPath, angle: Angle) {
        let pulse = to_pulse_width(angle, &self.calibration);
        match path {
            OutputPath::Direct(channel) => self.sink.drive_pulse(channel, pulse),
            OutputPath::Mux(bank, channel) => {
                if self.mux.select(bank, channel, &mut self.delay) {
                    self.sink.drive_pulse(self.shared_channels.get(bank), pulse);
                }
            }
            OutputPath::None => return,
        }
        trace!("{} <- {} ({})", path, angle, pulse);
    }

    fn reconfigure(&mut self, config: &Config) {
        self.calibration = config.calibration;
        self.shared_channels = config.wiring.shared_channels;
        self.mux.set_settle_micros(config.motion.settle_micros);
    }
}

mod test {
    #[cfg(test)]
    use crate::mock::{Bus, Delay, Pin, Sink};

    #[cfg(test)]
    fn outputs(bus: &Bus) -> super::Outputs<Sink, Pin, Delay> {
        use super::{MuxSelector, Outputs};
        use crate::config::Config;

        let mux = MuxSelector::new(bus.pins([2, 3, 4, 5]), bus.pins([6, 7, 8, 9]), 150);
        Outputs::new(Sink(bus.clone()), mux, Delay(bus.clone()), &Config::default())
    }

    #[test]
    fn test_init() {
        use crate::mock::Event::*;

        let bus = Bus::default();
        outputs(&bus).init();
        assert_eq!(bus.take(), [Init, DelayMillis(20)]);
    }

    #[test]
    fn test_write_direct() {
        use super::Output;
        use crate::mock::Event::*;
        use crate::types::{Angle, OutputPath};

        let bus = Bus::default();
        let mut outputs = outputs(&bus);
        outputs.write(OutputPath::Direct(1), Angle::clamped(90));
        assert_eq!(bus.take(), [Pulse(1, 340)]);
    }

    #[test]
    fn test_write_mux_selects_before_write() {
        use super::Output;
        use crate::mock::Event::*;
        use crate::types::{Angle, Bank, OutputPath};

        let bus = Bus::default();
        let mut outputs = outputs(&bus);
        outputs.write(OutputPath::Mux(Bank::B, 3), Angle::MAX);
        let expected = [
            Line(6, true),
            Line(7, true),
            Line(8, false),
            Line(9, false),
            DelayMicros(150),
            Pulse(3, 580),
        ];
        assert_eq!(bus.take(), expected);
    }

    #[test]
    fn test_write_inert_paths() {
        use super::Output;
        use crate::types::{Angle, Bank, OutputPath};

        let bus = Bus::default();
        let mut outputs = outputs(&bus);
        outputs.write(OutputPath::None, Angle::MAX);
        outputs.write(OutputPath::Mux(Bank::A, 16), Angle::MAX);
        assert!(bus.take().is_empty());
    }

    #[test]
    fn test_reconfigure() {
        use super::Output;
        use crate::config::{Calibration, Config};
        use crate::mock::Event::*;
        use crate::types::{Angle, Bank, OutputPath};

        let bus = Bus::default();
        let mut outputs = outputs(&bus);
        let mut config = Config::default();
        config.calibration = Calibration::WIDE;
        config.motion.settle_micros = 200;
        config.wiring.shared_channels.a = 7;
        outputs.reconfigure(&config);
        outputs.write(OutputPath::Mux(Bank::A, 0), Angle::MIN);
        let events = bus.take();
        assert_eq!(&events[4..], &[DelayMicros(200), Pulse(7, 80)]);
    }
}
