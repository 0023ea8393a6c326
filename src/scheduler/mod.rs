//! Motion scheduling for faces sharing the PCA9685.
//!
//! Two modes share the router, calibration and mux selection behind
//! [`Output`]: a sweep moves two faces through a full cycle one step per
//! tick, a batch collects angles and flushes them in a single commit.

pub mod batch;
pub mod sweep;

use hal::clock::Instant;

use crate::config::Motion;
use crate::output::Output;
use crate::types::{Angle, FaceId};

pub use batch::{Batch, PendingOutput};
pub use sweep::{Phase, Sweep};

#[derive(Copy, Clone, Debug, Default)]
pub struct MotionScheduler {
    motion: Motion,
    sweep: Sweep,
    batch: Batch,
}

impl MotionScheduler {
    pub fn new(motion: Motion) -> Self {
        Self { motion, sweep: Sweep::default(), batch: Batch::default() }
    }

    /// Takes effect from the next tick, a running sweep keeps its angle.
    pub fn reconfigure(&mut self, motion: Motion) {
        self.motion = motion;
    }

    /// Replaces whatever sweep is running, there is no sweep queue.
    pub fn start_movement(&mut self, face_a: FaceId, face_b: FaceId, now: Instant) {
        if self.sweep.phase() != Phase::Idle {
            let [a, b] = self.sweep.faces();
            debug!("Sweep faces {}, {} overridden at {}", a, b, self.sweep.angle());
        }
        self.sweep = Sweep::start(face_a, face_b, now);
        info!("Sweep start faces {}, {}", face_a, face_b);
    }

    pub fn tick(&mut self, now: Instant, output: &mut impl Output) -> bool {
        self.sweep.tick(now, &self.motion, output)
    }

    pub fn phase(&self) -> Phase {
        self.sweep.phase()
    }

    pub fn sweep(&self) -> &Sweep {
        &self.sweep
    }

    pub fn queue(&mut self, face: FaceId, angle: Angle) {
        self.batch.queue(face, angle)
    }

    pub fn commit(&self, output: &mut impl Output) {
        self.batch.commit(output);
        debug!("Committed {:?}", self.batch);
    }

    pub fn reset_all(&self, output: &mut impl Output) {
        batch::reset_all(output)
    }

    pub fn clear(&mut self) {
        self.batch.clear()
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }
}

mod test {
    #[cfg(test)]
    use hal::clock::Instant;

    #[cfg(test)]
    fn at(millis: u64) -> Instant {
        Instant::from_ticks(millis)
    }

    #[test]
    fn test_sweep_waveform() {
        use std::vec::Vec;

        use super::{MotionScheduler, Phase};
        use crate::config::Motion;
        use crate::mock::Recorder;
        use crate::types::OutputPath;

        let mut scheduler = MotionScheduler::new(Motion::default());
        let mut recorder = Recorder::default();
        scheduler.start_movement(1, 2, at(0));
        assert_eq!(scheduler.phase(), Phase::Forward);

        let mut phases = Vec::new();
        let mut now = 0;
        while scheduler.phase() != Phase::Idle {
            now += 15;
            assert!(scheduler.tick(at(now), &mut recorder));
            phases.push(scheduler.phase());
        }
        assert_eq!(phases.len(), 121);
        assert_eq!(phases[58], Phase::Forward);
        assert_eq!(phases[59], Phase::Backward);
        assert_eq!(phases[119], Phase::Backward);
        assert_eq!(phases[120], Phase::Idle);
        assert_eq!(phases.iter().filter(|&&phase| phase == Phase::Idle).count(), 1);

        let expected: Vec<u8> = (0..180).step_by(3).chain((0..=180).rev().step_by(3)).collect();
        let angles = recorder.angles();
        let first: Vec<u8> = angles.chunks(2).map(|pair| pair[0]).collect();
        assert_eq!(first, expected);
        assert!(angles.chunks(2).all(|pair| pair[0] == pair[1]));
        assert!(recorder.0.chunks(2).all(|pair| {
            pair[0].0 == OutputPath::Direct(0) && pair[1].0 == OutputPath::Direct(1)
        }));

        let writes = recorder.0.len();
        assert!(!scheduler.tick(at(now + 15), &mut recorder));
        assert!(!scheduler.tick(at(now + 1000), &mut recorder));
        assert_eq!(recorder.0.len(), writes);
    }

    #[test]
    fn test_sweep_step_gating() {
        use super::MotionScheduler;
        use crate::config::Motion;
        use crate::mock::Recorder;

        let mut scheduler = MotionScheduler::new(Motion::default());
        let mut recorder = Recorder::default();
        scheduler.start_movement(3, 12, at(100));

        assert!(!scheduler.tick(at(100), &mut recorder));
        assert!(!scheduler.tick(at(114), &mut recorder));
        assert!(scheduler.tick(at(115), &mut recorder));
        assert!(!scheduler.tick(at(129), &mut recorder));
        // late tick, one step only and the cadence restarts from here
        assert!(scheduler.tick(at(200), &mut recorder));
        assert!(!scheduler.tick(at(214), &mut recorder));
        assert!(scheduler.tick(at(215), &mut recorder));
        assert_eq!(recorder.angles(), [0, 0, 3, 3, 6, 6]);
    }

    #[test]
    fn test_sweep_uneven_step() {
        use std::vec::Vec;

        use super::{MotionScheduler, Phase};
        use crate::config::Motion;
        use crate::mock::Recorder;

        let motion = Motion { step_degrees: 7, ..Default::default() };
        let mut scheduler = MotionScheduler::new(motion);
        let mut recorder = Recorder::default();
        scheduler.start_movement(4, 4, at(0));
        let mut now = 0;
        while scheduler.phase() != Phase::Idle {
            now += 15;
            scheduler.tick(at(now), &mut recorder);
        }
        let angles: Vec<u8> = recorder.angles().chunks(2).map(|pair| pair[0]).collect();
        assert_eq!(angles[25], 175);
        assert_eq!(angles[26], 180);
        assert_eq!(angles[27], 173);
        assert_eq!(angles[angles.len() - 2], 5);
        assert_eq!(angles[angles.len() - 1], 0);
    }

    #[test]
    fn test_sweep_zero_step_finishes() {
        use super::{MotionScheduler, Phase};
        use crate::config::Motion;
        use crate::mock::Recorder;

        let json = r#"{"step-interval":15,"step-degrees":0,"settle-micros":150}"#;
        let motion: Motion = serde_json::from_str(json).unwrap();
        assert_eq!(motion.step_degrees, 0);
        let mut scheduler = MotionScheduler::new(motion);
        let mut recorder = Recorder::default();
        scheduler.start_movement(1, 1, at(0));
        let mut ticks = 0;
        while scheduler.phase() != Phase::Idle && ticks < 1000 {
            ticks += 1;
            scheduler.tick(at(ticks * 15), &mut recorder);
        }
        assert_eq!(scheduler.phase(), Phase::Idle);
        assert_eq!(ticks, 361);
    }

    #[test]
    fn test_sweep_restart_overrides() {
        use super::{MotionScheduler, Phase};
        use crate::config::Motion;
        use crate::mock::Recorder;
        use crate::types::{Angle, Bank, OutputPath};

        let mut scheduler = MotionScheduler::new(Motion::default());
        let mut recorder = Recorder::default();
        scheduler.start_movement(1, 2, at(0));
        for i in 1..=10 {
            scheduler.tick(at(i * 15), &mut recorder);
        }
        assert_eq!(scheduler.sweep().angle(), Angle::clamped(30));

        scheduler.start_movement(5, 20, at(150));
        assert_eq!(scheduler.phase(), Phase::Forward);
        assert_eq!(scheduler.sweep().angle(), Angle::MIN);
        assert_eq!(scheduler.sweep().faces(), [5, 20]);
        let paths = [OutputPath::Mux(Bank::A, 4), OutputPath::Mux(Bank::B, 9)];
        assert_eq!(scheduler.sweep().paths(), paths);

        recorder.0.clear();
        assert!(!scheduler.tick(at(160), &mut recorder));
        assert!(scheduler.tick(at(165), &mut recorder));
        assert_eq!(recorder.0, [(paths[0], Angle::MIN), (paths[1], Angle::MIN)]);
    }

    #[test]
    fn test_idle_scheduler_is_inert() {
        use super::{MotionScheduler, Phase};
        use crate::config::Motion;
        use crate::mock::Recorder;

        let mut scheduler = MotionScheduler::new(Motion::default());
        let mut recorder = Recorder::default();
        assert_eq!(scheduler.phase(), Phase::Idle);
        assert!(!scheduler.tick(at(1_000_000), &mut recorder));
        assert!(recorder.0.is_empty());
    }

    #[test]
    fn test_commit_latest_mux_wins() {
        use super::MotionScheduler;
        use crate::config::Motion;
        use crate::mock::Recorder;
        use crate::types::{Angle, Bank, OutputPath};

        let mut scheduler = MotionScheduler::default();
        scheduler.reconfigure(Motion::default());
        let mut recorder = Recorder::default();
        scheduler.queue(5, Angle::clamped(40));
        scheduler.queue(8, Angle::clamped(70));
        scheduler.commit(&mut recorder);

        let expected = [
            (OutputPath::Direct(0), Angle::MIN),
            (OutputPath::Direct(1), Angle::MIN),
            (OutputPath::Mux(Bank::A, 7), Angle::clamped(70)),
        ];
        assert_eq!(recorder.0, expected);
    }

    #[test]
    fn test_commit_direct_only() {
        use super::MotionScheduler;
        use crate::mock::Recorder;
        use crate::types::{Angle, OutputPath};

        let mut scheduler = MotionScheduler::default();
        let mut recorder = Recorder::default();
        scheduler.queue(1, Angle::clamped(90));
        scheduler.queue(0, Angle::MAX);
        scheduler.queue(21, Angle::MAX);
        scheduler.commit(&mut recorder);

        let expected = [
            (OutputPath::Direct(0), Angle::clamped(90)),
            (OutputPath::Direct(1), Angle::MIN),
        ];
        assert_eq!(recorder.0, expected);
    }

    #[test]
    fn test_commit_order_and_repeat() {
        use super::MotionScheduler;
        use crate::mock::Recorder;
        use crate::types::{Angle, Bank, OutputPath};

        let mut scheduler = MotionScheduler::default();
        let mut recorder = Recorder::default();
        scheduler.queue(15, Angle::clamped(10));
        scheduler.queue(3, Angle::clamped(20));
        scheduler.queue(2, Angle::clamped(30));
        scheduler.queue(2, Angle::clamped(35));
        scheduler.commit(&mut recorder);

        let expected = [
            (OutputPath::Direct(0), Angle::MIN),
            (OutputPath::Direct(1), Angle::clamped(35)),
            (OutputPath::Mux(Bank::A, 2), Angle::clamped(20)),
            (OutputPath::Mux(Bank::B, 4), Angle::clamped(10)),
        ];
        assert_eq!(recorder.0, expected);

        // pending slots survive the commit
        recorder.0.clear();
        scheduler.commit(&mut recorder);
        assert_eq!(recorder.0, expected);

        scheduler.clear();
        recorder.0.clear();
        scheduler.commit(&mut recorder);
        assert_eq!(recorder.0.len(), 2);
        assert_eq!(scheduler.batch().pending(Bank::A), None);
    }

    #[test]
    fn test_reset_all() {
        use super::MotionScheduler;
        use crate::mock::Recorder;
        use crate::types::{Angle, Bank, OutputPath};

        let mut scheduler = MotionScheduler::default();
        let mut recorder = Recorder::default();
        scheduler.queue(1, Angle::clamped(90));
        scheduler.queue(6, Angle::clamped(90));
        scheduler.start_movement(1, 2, at(0));
        scheduler.reset_all(&mut recorder);

        let expected = [(OutputPath::Direct(0), Angle::MIN), (OutputPath::Direct(1), Angle::MIN)];
        assert_eq!(recorder.0, expected);
        assert_eq!(scheduler.batch().direct(0), Some(Angle::clamped(90)));
        assert!(scheduler.batch().pending(Bank::A).is_some());
    }
}
