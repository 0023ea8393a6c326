use core::str::{FromStr, Split};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error {
    UnknownPath,
    ExpectValue,
    InvalidValue,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let err_string = match self {
            Self::UnknownPath => "Specified path not exists or invalid",
            Self::ExpectValue => "Expect value",
            Self::InvalidValue => "Value not valid",
        };
        write!(f, "{}", err_string)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Value<'a>(pub Option<&'a str>);

impl<'a> Value<'a> {
    pub fn of(string: &'a str) -> Value<'a> {
        Value(Some(string))
    }

    pub fn str(&self) -> Result<&'a str, Error> {
        self.0.ok_or(Error::ExpectValue)
    }

    pub fn parse<T: FromStr>(&self) -> Result<T, Error> {
        T::from_str(self.str()?).map_err(|_| Error::InvalidValue)
    }

    pub fn parse_or<T: FromStr>(&self, or: T) -> Result<T, Error> {
        match self.0 {
            Some(s) => T::from_str(s).map_err(|_| Error::InvalidValue),
            None => Ok(or),
        }
    }
}

/// Dotted path into the configuration tree, e.g. `motion.step-degrees`.
#[derive(Clone, Debug)]
pub struct Path<'a>(Split<'a, char>);

impl<'a> Path<'a> {
    pub fn new(path: &'a str) -> Self {
        Self(path.split('.'))
    }

    pub fn str(&mut self) -> Result<&'a str, Error> {
        self.0.next().ok_or(Error::UnknownPath)
    }

    pub fn is_end(&self) -> bool {
        self.0.clone().next().is_none()
    }
}

pub trait PathSet {
    fn set(&mut self, path: Path, value: Value) -> Result<(), Error>;
}

/// Split `path=value` and apply it, a missing `=value` resets to default where supported.
pub fn apply<T: PathSet>(target: &mut T, assignment: &str) -> Result<(), Error> {
    let (path, value) = match assignment.split_once('=') {
        Some((path, value)) => (path.trim(), Value::of(value.trim())),
        None => (assignment.trim(), Value(None)),
    };
    target.set(Path::new(path), value)
}
