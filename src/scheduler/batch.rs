use crate::config::PerBank;
use crate::output::Output;
use crate::router::resolve;
use crate::types::{Angle, Bank, FaceId, OutputPath};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingOutput {
    pub channel: u8,
    pub angle: Angle,
}

/// Angles waiting for the next commit.
///
/// The two direct servos always carry an angle. Each mux bank drives a single
/// shared PCA9685 channel, so only the latest queued face of a bank survives.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Batch {
    direct: [Angle; 2],
    mux: PerBank<Option<PendingOutput>>,
}

impl Batch {
    pub fn queue(&mut self, face: FaceId, angle: Angle) {
        match resolve(face) {
            OutputPath::Direct(channel) => {
                if let Some(slot) = self.direct.get_mut(channel as usize) {
                    *slot = angle;
                }
            }
            OutputPath::Mux(bank, channel) => {
                *self.mux.get_mut(bank) = Some(PendingOutput { channel, angle })
            }
            OutputPath::None => (),
        }
    }

    pub fn direct(&self, channel: u8) -> Option<Angle> {
        self.direct.get(channel as usize).copied()
    }

    pub fn pending(&self, bank: Bank) -> Option<PendingOutput> {
        self.mux.get(bank)
    }

    /// Direct channels first, then mux A, then mux B. Nothing is cleared, so
    /// committing again repeats the same outputs.
    pub fn commit(&self, output: &mut impl Output) {
        for (channel, &angle) in self.direct.iter().enumerate() {
            output.write(OutputPath::Direct(channel as u8), angle);
        }
        for bank in Bank::ALL {
            if let Some(pending) = self.mux.get(bank) {
                output.write(OutputPath::Mux(bank, pending.channel), pending.angle);
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Home both direct servos without going through the pending angles.
pub fn reset_all(output: &mut impl Output) {
    for channel in 0..2 {
        output.write(OutputPath::Direct(channel), Angle::MIN);
    }
}
