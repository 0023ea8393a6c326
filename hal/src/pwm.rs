use fugit::HertzU32;

/// Analog hobby servos expect a 20ms frame.
pub const SERVO_FREQUENCY: HertzU32 = HertzU32::from_raw(50);

/// A PWM chip addressed by channel number, consumed fire-and-forget.
pub trait PulseSink {
    /// One-time bring-up, leaves every channel running at `SERVO_FREQUENCY`.
    fn init(&mut self);

    /// Set the off-tick of `channel`, pulses always start at tick 0.
    fn drive_pulse(&mut self, channel: u8, pulse: u16);
}

impl<S: PulseSink + ?Sized> PulseSink for &mut S {
    fn init(&mut self) {
        (**self).init()
    }

    fn drive_pulse(&mut self, channel: u8, pulse: u16) {
        (**self).drive_pulse(channel, pulse)
    }
}
