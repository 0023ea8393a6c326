use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::OutputPin;
use hal::pwm::PulseSink;

use crate::output::Output;
use crate::types::{Angle, OutputPath};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Event {
    Init,
    Line(u8, bool),
    DelayMicros(u32),
    DelayMillis(u32),
    Pulse(u8, u16),
}

#[derive(Clone, Default)]
pub struct Bus(Rc<RefCell<Vec<Event>>>);

impl Bus {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event)
    }

    pub fn take(&self) -> Vec<Event> {
        core::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn pins(&self, numbers: [u8; 4]) -> [Pin; 4] {
        numbers.map(|number| Pin { number, bus: self.clone() })
    }
}

pub struct Pin {
    number: u8,
    bus: Bus,
}

impl OutputPin for Pin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.bus.push(Event::Line(self.number, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.bus.push(Event::Line(self.number, true));
        Ok(())
    }
}

pub struct Delay(pub Bus);

impl DelayUs<u32> for Delay {
    fn delay_us(&mut self, us: u32) {
        self.0.push(Event::DelayMicros(us))
    }
}

impl DelayMs<u32> for Delay {
    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::DelayMillis(ms))
    }
}

pub struct Sink(pub Bus);

impl PulseSink for Sink {
    fn init(&mut self) {
        self.0.push(Event::Init)
    }

    fn drive_pulse(&mut self, channel: u8, pulse: u16) {
        self.0.push(Event::Pulse(channel, pulse))
    }
}

/// Records writes at path level, below the router and above the hardware.
#[derive(Default)]
pub struct Recorder(pub Vec<(OutputPath, Angle)>);

impl Recorder {
    pub fn angles(&self) -> Vec<u8> {
        self.0.iter().map(|(_, angle)| angle.degrees()).collect()
    }
}

impl Output for Recorder {
    fn write(&mut self, path: OutputPath, angle: Angle) {
        self.0.push((path, angle))
    }
}

#[derive(Default)]
pub struct Clock(pub core::cell::Cell<u64>);

impl Clock {
    pub fn advance(&self, millis: u64) {
        self.0.set(self.0.get() + millis)
    }
}

impl hal::clock::Monotonic for Clock {
    fn now(&self) -> hal::clock::Instant {
        hal::clock::Instant::from_ticks(self.0.get())
    }
}
