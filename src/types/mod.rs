pub mod angle;
pub mod face;

pub use angle::Angle;
pub use face::{Bank, FaceId, OutputPath};
