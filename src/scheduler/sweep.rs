use hal::clock::{elapsed, Duration, Instant};

use crate::config::Motion;
use crate::output::Output;
use crate::router::resolve;
use crate::types::{Angle, FaceId, OutputPath};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Forward,
    Backward,
}

/// One 0° → 180° → 0° cycle carried by two faces at the same angle.
#[derive(Copy, Clone, Debug)]
pub struct Sweep {
    phase: Phase,
    angle: Angle,
    faces: [(FaceId, OutputPath); 2],
    last_step: Instant,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            angle: Angle::MIN,
            faces: [(0, OutputPath::None); 2],
            last_step: Instant::from_ticks(0),
        }
    }
}

impl Sweep {
    /// Paths are resolved here once, the sweep never looks at the router again.
    pub fn start(face_a: FaceId, face_b: FaceId, now: Instant) -> Self {
        Self {
            phase: Phase::Forward,
            angle: Angle::MIN,
            faces: [(face_a, resolve(face_a)), (face_b, resolve(face_b))],
            last_step: now,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn angle(&self) -> Angle {
        self.angle
    }

    pub fn faces(&self) -> [FaceId; 2] {
        [self.faces[0].0, self.faces[1].0]
    }

    pub fn paths(&self) -> [OutputPath; 2] {
        [self.faces[0].1, self.faces[1].1]
    }

    /// Performs at most one step, returns whether anything was written.
    ///
    /// A late tick performs a single late step, missed steps are not replayed.
    pub fn tick(&mut self, now: Instant, motion: &Motion, output: &mut impl Output) -> bool {
        if self.phase == Phase::Idle {
            return false;
        }
        if elapsed(now, self.last_step) < Duration::millis(motion.step_interval as u64) {
            return false;
        }
        self.last_step = now;

        for &(_, path) in self.faces.iter() {
            output.write(path, self.angle);
        }

        let [face_a, face_b] = self.faces();
        match self.phase {
            Phase::Forward => {
                self.angle = self.angle.saturating_add(motion.step());
                if self.angle == Angle::MAX {
                    self.phase = Phase::Backward;
                    info!("Sweep faces {}, {} reverse", face_a, face_b);
                }
            }
            Phase::Backward => {
                if self.angle == Angle::MIN {
                    self.phase = Phase::Idle;
                    info!("Sweep faces {}, {} done", face_a, face_b);
                } else {
                    self.angle = self.angle.saturating_sub(motion.step());
                }
            }
            Phase::Idle => (),
        }
        true
    }
}
