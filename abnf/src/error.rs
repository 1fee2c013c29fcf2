use std::error;
use std::fmt::{self, Display};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Failure from the combinator engine, including the ABNF text not
    /// matching the ABNF grammar itself.
    Grammar(parsegen::Error),
    InvalidOperator { rule: String, operator: String },
    /// `=/` for a rule that was never defined with `=`.
    UndefinedIncrement(String),
    /// A numeric value or repeat count that names no character or count.
    InvalidValue(String),
    Decode(String),
    /// The ABNF parse tree lacks a node the compiler relies on.
    Malformed(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Grammar(ref e) => write!(f, "{}", e),
            Error::InvalidOperator {
                ref rule,
                ref operator,
            } => write!(f, "Invalid operator '{}' for rule '{}'.", operator, rule),
            Error::UndefinedIncrement(ref rule) => {
                write!(f, "Rule '{}' extended with '=/' before it was defined.", rule)
            }
            Error::InvalidValue(ref s) => write!(f, "invalid value: {}", s),
            Error::Decode(ref s) => write!(f, "failed to decode: {}", s),
            Error::Malformed(ref s) => write!(f, "malformed ABNF tree: {}", s),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Grammar(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<parsegen::Error> for Error {
    fn from(err: parsegen::Error) -> Error {
        Error::Grammar(err)
    }
}

impl From<nom::Err<nom::error::Error<&str>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> Error {
        Error::Decode(format!("{:?}", err))
    }
}
