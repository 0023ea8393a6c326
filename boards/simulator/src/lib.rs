#[macro_use]
extern crate log;

use std::convert::Infallible;
use std::time::{Duration, Instant as StdInstant};

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::OutputPin;
use hal::clock::{Instant, Monotonic};
use hal::pwm::{PulseSink, SERVO_FREQUENCY};
use servo_faces::config::Config;
use servo_faces::controller::Controller;
use servo_faces::mux::MuxSelector;
use servo_faces::output::Outputs;

/// GPIO that only reports level changes.
pub struct Pin {
    number: u8,
    high: Option<bool>,
}

impl Pin {
    pub fn new(number: u8) -> Self {
        Self { number, high: None }
    }

    fn set(&mut self, high: bool) {
        if self.high != Some(high) {
            debug!("GPIO{} -> {}", self.number, if high { "high" } else { "low" });
        }
        self.high = Some(high);
    }
}

impl OutputPin for Pin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.set(true);
        Ok(())
    }
}

/// Sixteen PWM channels that only report writes.
pub struct Sink;

impl PulseSink for Sink {
    fn init(&mut self) {
        info!("PWM running at {}Hz", SERVO_FREQUENCY.raw());
    }

    fn drive_pulse(&mut self, channel: u8, pulse: u16) {
        match channel {
            0..=15 => info!("PWM{} <- {}", channel, pulse),
            _ => warn!("No PWM channel {}", channel),
        }
    }
}

pub struct Delay;

impl DelayUs<u32> for Delay {
    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(us as u64))
    }
}

impl DelayMs<u32> for Delay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64))
    }
}

pub struct WallClock(StdInstant);

impl WallClock {
    pub fn new() -> Self {
        Self(StdInstant::now())
    }
}

impl Monotonic for WallClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.0.elapsed().as_millis() as u64)
    }
}

pub type Simulator = Controller<Outputs<Sink, Pin, Delay>, WallClock>;

pub fn build(config: &Config) -> Simulator {
    let pins = config.wiring.select_pins;
    let settle_micros = config.motion.settle_micros;
    let mux = MuxSelector::new(pins.a.map(Pin::new), pins.b.map(Pin::new), settle_micros);
    let mut outputs = Outputs::new(Sink, mux, Delay, config);
    outputs.init();
    Controller::new(outputs, WallClock::new(), config.motion)
}

/// Feed one command line, then keep updating until any sweep has finished.
pub fn run(simulator: &mut Simulator, line: &str) -> Result<(), String> {
    simulator.handle_line(line).map_err(|e| format!("{}: {}", line, e))?;
    while !simulator.is_idle() {
        if !simulator.update() {
            std::thread::sleep(Duration::from_millis(1));
        }
    }
    Ok(())
}
