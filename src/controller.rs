use hal::clock::Monotonic;

use crate::command::{self, Command};
use crate::config::{Config, Motion};
use crate::output::Output;
use crate::scheduler::{MotionScheduler, Phase};

/// Control loop glue: one clock, one hardware context, one scheduler.
pub struct Controller<O, C> {
    output: O,
    clock: C,
    scheduler: MotionScheduler,
}

impl<O: Output, C: Monotonic> Controller<O, C> {
    pub fn new(output: O, clock: C, motion: Motion) -> Self {
        Self { output, clock, scheduler: MotionScheduler::new(motion) }
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Sweep(face_a, face_b) => {
                self.scheduler.start_movement(face_a, face_b, self.clock.now())
            }
            Command::Queue(face, angle) => self.scheduler.queue(face, angle),
            Command::Commit => self.scheduler.commit(&mut self.output),
            Command::Reset => self.scheduler.reset_all(&mut self.output),
            Command::Clear => self.scheduler.clear(),
        }
    }

    pub fn handle_line(&mut self, line: &str) -> Result<(), command::Error> {
        let command: Command = line.parse()?;
        self.execute(command);
        Ok(())
    }

    /// Call from the main loop, never blocks for more than one step.
    pub fn update(&mut self) -> bool {
        let now = self.clock.now();
        self.scheduler.tick(now, &mut self.output)
    }

    pub fn is_idle(&self) -> bool {
        self.scheduler.phase() == Phase::Idle
    }

    /// Applies a whole new config, a running sweep keeps its angle.
    pub fn reconfigure(&mut self, config: &Config) {
        self.scheduler.reconfigure(config.motion);
        self.output.reconfigure(config);
    }

    pub fn output(&mut self) -> &mut O {
        &mut self.output
    }
}

mod test {
    #[test]
    fn test_controller_sweep() {
        use super::Controller;
        use crate::config::Motion;
        use crate::mock::{Clock, Recorder};

        let clock = Clock::default();
        let mut controller = Controller::new(Recorder::default(), &clock, Motion::default());
        controller.handle_line("sweep 1 2").unwrap();
        assert!(!controller.is_idle());
        assert!(!controller.update());

        let mut steps = 0;
        while !controller.is_idle() {
            clock.advance(20);
            assert!(controller.update());
            steps += 1;
        }
        assert_eq!(steps, 121);
        assert_eq!(controller.output().0.len(), 242);
    }

    #[test]
    fn test_controller_batch() {
        use super::Controller;
        use crate::command::Error;
        use crate::config::Motion;
        use crate::mock::{Clock, Recorder};
        use crate::types::{Angle, Bank, OutputPath};

        let clock = Clock::default();
        let mut controller = Controller::new(Recorder::default(), &clock, Motion::default());
        for line in ["face 5 40", "face 8 70", "face 1 90", "face 42 90", "commit"] {
            controller.handle_line(line).unwrap();
        }
        assert_eq!(controller.handle_line("wiggle"), Err(Error::UnknownCommand));

        let expected = [
            (OutputPath::Direct(0), Angle::clamped(90)),
            (OutputPath::Direct(1), Angle::MIN),
            (OutputPath::Mux(Bank::A, 7), Angle::clamped(70)),
        ];
        assert_eq!(controller.output().0, expected);

        controller.output().0.clear();
        controller.handle_line("reset").unwrap();
        let expected = [(OutputPath::Direct(0), Angle::MIN), (OutputPath::Direct(1), Angle::MIN)];
        assert_eq!(controller.output().0, expected);
    }

    #[test]
    fn test_controller_drives_hardware() {
        use super::Controller;
        use crate::config::Config;
        use crate::mock::{Bus, Clock, Delay, Event::*, Sink};
        use crate::mux::MuxSelector;
        use crate::output::Outputs;

        let bus = Bus::default();
        let config = Config::default();
        let mux = MuxSelector::new(bus.pins([2, 3, 4, 5]), bus.pins([6, 7, 8, 9]), 150);
        let outputs = Outputs::new(Sink(bus.clone()), mux, Delay(bus.clone()), &config);
        let clock = Clock::default();
        let mut controller = Controller::new(outputs, &clock, config.motion);

        controller.handle_line("face 5 40").unwrap();
        controller.handle_line("face 8 70").unwrap();
        controller.handle_line("commit").unwrap();
        let expected = [
            Pulse(0, 100),
            Pulse(1, 100),
            Line(2, true),
            Line(3, true),
            Line(4, true),
            Line(5, false),
            DelayMicros(150),
            Pulse(2, 286),
        ];
        assert_eq!(bus.take(), expected);

        controller.handle_line("reset").unwrap();
        assert_eq!(bus.take(), [Pulse(0, 100), Pulse(1, 100)]);
    }

    #[test]
    fn test_controller_reconfigure() {
        use super::Controller;
        use crate::config::{Calibration, Config};
        use crate::mock::{Bus, Clock, Delay, Event::*, Sink};
        use crate::mux::MuxSelector;
        use crate::output::Outputs;

        let bus = Bus::default();
        let mut config = Config::default();
        let mux = MuxSelector::new(bus.pins([2, 3, 4, 5]), bus.pins([6, 7, 8, 9]), 150);
        let outputs = Outputs::new(Sink(bus.clone()), mux, Delay(bus.clone()), &config);
        let clock = Clock::default();
        let mut controller = Controller::new(outputs, &clock, config.motion);

        config.calibration = Calibration::WIDE;
        config.motion.settle_micros = 400;
        config.motion.step_interval = 30;
        controller.reconfigure(&config);

        controller.handle_line("face 5 40").unwrap();
        controller.handle_line("commit").unwrap();
        let events = bus.take();
        assert_eq!(&events[..2], &[Pulse(0, 80), Pulse(1, 80)]);
        assert_eq!(&events[6..], &[DelayMicros(400), Pulse(2, 195)]);

        controller.handle_line("sweep 1 1").unwrap();
        clock.advance(20);
        assert!(!controller.update());
        clock.advance(10);
        assert!(controller.update());
    }
}
