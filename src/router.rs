use core::ops::RangeInclusive;

use crate::types::{Bank, FaceId, OutputPath};

/// Every face slot that has an output behind it.
pub const FACES: RangeInclusive<FaceId> = 1..=20;

/// Static wiring of faces to outputs.
///
/// Faces 1 and 2 are the test servos on PCA9685 channels 0 and 1, faces 3 to 10
/// sit on mux A lines 2 to 9 and faces 11 to 20 on mux B lines 0 to 9. Anything
/// else resolves to `OutputPath::None` so callers may probe unused slots freely.
pub fn resolve(face: FaceId) -> OutputPath {
    match face {
        1 | 2 => OutputPath::Direct(face - 1),
        3..=10 => OutputPath::Mux(Bank::A, face - 1),
        11..=20 => OutputPath::Mux(Bank::B, face - 11),
        _ => OutputPath::None,
    }
}

mod test {
    #[test]
    fn test_resolve_direct() {
        use super::resolve;
        use crate::types::OutputPath;

        assert_eq!(resolve(1), OutputPath::Direct(0));
        assert_eq!(resolve(2), OutputPath::Direct(1));
    }

    #[test]
    fn test_resolve_mux() {
        use super::resolve;
        use crate::types::{Bank, OutputPath};

        for face in 3..=10 {
            assert_eq!(resolve(face), OutputPath::Mux(Bank::A, face - 1));
        }
        for face in 11..=20 {
            assert_eq!(resolve(face), OutputPath::Mux(Bank::B, face - 11));
        }
        assert_eq!(resolve(10), OutputPath::Mux(Bank::A, 9));
        assert_eq!(resolve(11), OutputPath::Mux(Bank::B, 0));
    }

    #[test]
    fn test_resolve_out_of_range() {
        use super::{resolve, FACES};
        use crate::types::OutputPath;

        assert_eq!(resolve(0), OutputPath::None);
        assert_eq!(resolve(21), OutputPath::None);
        assert_eq!(resolve(u8::MAX), OutputPath::None);
        assert!(FACES.clone().all(|face| resolve(face) != OutputPath::None));
    }
}
