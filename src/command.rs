use core::num::IntErrorKind;
use core::str::FromStr;

use crate::types::{Angle, FaceId};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Sweep(FaceId, FaceId),
    Queue(FaceId, Angle),
    Commit,
    Reset,
    Clear,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error {
    Empty,
    UnknownCommand,
    ExpectArgument,
    InvalidNumber,
    LineTooLong,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let err_string = match self {
            Self::Empty => "Empty command",
            Self::UnknownCommand => "Unknown command",
            Self::ExpectArgument => "Expect argument",
            Self::InvalidNumber => "Not a number",
            Self::LineTooLong => "Line too long",
        };
        write!(f, "{}", err_string)
    }
}

/// Face numbers that do not fit are mapped to slot 0, which has no output.
fn parse_face(word: Option<&str>) -> Result<FaceId, Error> {
    let word = word.ok_or(Error::ExpectArgument)?;
    match word.parse::<i32>() {
        Ok(number) => Ok(FaceId::try_from(number).unwrap_or(0)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Ok(0),
            _ => Err(Error::InvalidNumber),
        },
    }
}

fn parse_angle(word: Option<&str>) -> Result<Angle, Error> {
    word.ok_or(Error::ExpectArgument)?.parse().map_err(|_| Error::InvalidNumber)
}

impl FromStr for Command {
    type Err = Error;

    /// One command per line, a bare face number sweeps that face on its own.
    fn from_str(line: &str) -> Result<Self, Error> {
        let mut words = line.split_whitespace();
        let command = match words.next().ok_or(Error::Empty)? {
            "sweep" => Self::Sweep(parse_face(words.next())?, parse_face(words.next())?),
            "face" => Self::Queue(parse_face(words.next())?, parse_angle(words.next())?),
            "commit" => Self::Commit,
            "reset" => Self::Reset,
            "clear" => Self::Clear,
            word if word.starts_with(|c: char| c.is_ascii_digit() || c == '-') => {
                let face = parse_face(Some(word))?;
                Self::Sweep(face, face)
            }
            _ => return Err(Error::UnknownCommand),
        };
        Ok(command)
    }
}

/// Collects bytes from a serial link until a line is complete.
#[derive(Default)]
pub struct LineBuffer<const N: usize> {
    line: heapless::String<N>,
    overflow: bool,
}

impl<const N: usize> LineBuffer<N> {
    pub fn new() -> Self {
        Self { line: heapless::String::new(), overflow: false }
    }

    /// Returns the parsed command once `byte` terminates a non-empty line.
    pub fn push(&mut self, byte: u8) -> Option<Result<Command, Error>> {
        if byte != b'\r' && byte != b'\n' {
            if !byte.is_ascii() || self.line.push(byte as char).is_err() {
                self.overflow = true;
            }
            return None;
        }
        let result = match self.overflow {
            true => Err(Error::LineTooLong),
            false if self.line.trim().is_empty() => return None,
            false => self.line.parse(),
        };
        self.line.clear();
        self.overflow = false;
        Some(result)
    }
}

mod test {
    #[test]
    fn test_parse_command() {
        use super::Command;
        use crate::types::Angle;

        assert_eq!("sweep 3 12".parse::<Command>(), Ok(Command::Sweep(3, 12)));
        assert_eq!("  face 5 40\r\n".parse::<Command>(), Ok(Command::Queue(5, Angle::clamped(40))));
        assert_eq!("face 1 270".parse::<Command>(), Ok(Command::Queue(1, Angle::MAX)));
        assert_eq!("commit".parse::<Command>(), Ok(Command::Commit));
        assert_eq!("reset".parse::<Command>(), Ok(Command::Reset));
        assert_eq!("clear".parse::<Command>(), Ok(Command::Clear));
        assert_eq!("7".parse::<Command>(), Ok(Command::Sweep(7, 7)));
    }

    #[test]
    fn test_parse_out_of_range_face() {
        use super::Command;
        use crate::types::Angle;

        assert_eq!("sweep 21 300".parse::<Command>(), Ok(Command::Sweep(21, 0)));
        assert_eq!("face -4 10".parse::<Command>(), Ok(Command::Queue(0, Angle::clamped(10))));
        assert_eq!("-1".parse::<Command>(), Ok(Command::Sweep(0, 0)));
    }

    #[test]
    fn test_parse_overflowing_numbers() {
        use super::Command;
        use crate::types::Angle;

        assert_eq!("face 5 3000000000".parse::<Command>(), Ok(Command::Queue(5, Angle::MAX)));
        assert_eq!("face 5 -3000000000".parse::<Command>(), Ok(Command::Queue(5, Angle::MIN)));
        assert_eq!("sweep 99999999999 1".parse::<Command>(), Ok(Command::Sweep(0, 1)));
        assert_eq!("99999999999".parse::<Command>(), Ok(Command::Sweep(0, 0)));
    }

    #[test]
    fn test_parse_command_error() {
        use super::{Command, Error};

        assert_eq!("".parse::<Command>(), Err(Error::Empty));
        assert_eq!("dance".parse::<Command>(), Err(Error::UnknownCommand));
        assert_eq!("sweep 3".parse::<Command>(), Err(Error::ExpectArgument));
        assert_eq!("face five 10".parse::<Command>(), Err(Error::InvalidNumber));
        assert_eq!("face 5 up".parse::<Command>(), Err(Error::InvalidNumber));
        assert_eq!("5x".parse::<Command>(), Err(Error::InvalidNumber));
    }

    #[test]
    fn test_line_buffer() {
        use super::{Command, Error, LineBuffer};

        let mut buffer: LineBuffer<16> = LineBuffer::new();
        let mut results = std::vec::Vec::new();
        for &byte in b"\r\nsweep 1 2\r\ncommit\nface 3 4 5 6 7 8 9 10 11\nreset\n".iter() {
            if let Some(result) = buffer.push(byte) {
                results.push(result);
            }
        }
        let expected = [
            Ok(Command::Sweep(1, 2)),
            Ok(Command::Commit),
            Err(Error::LineTooLong),
            Ok(Command::Reset),
        ];
        assert_eq!(results, expected);
    }
}
