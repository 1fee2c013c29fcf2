use std::error;
use std::fmt::{self, Display};

pub type Result<T> = std::result::Result<T, Error>;

/// A hard parse error, raised when an asserted combinator fails to match.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub offset: usize,
    pub message: String,
    pub input: String,
}

impl ParseError {
    pub fn new(offset: usize, message: impl Into<String>, input: &str) -> Self {
        ParseError {
            offset,
            message: message.into(),
            input: input.to_owned(),
        }
    }

    /// 1-based line and column of the offending offset.
    pub fn line_col(&self) -> (usize, usize) {
        let end = self.offset.min(self.input.len());
        let before = self.input.get(..end).unwrap_or(&self.input);
        let line = before.matches('\n').count() + 1;
        let col = match before.rfind('\n') {
            Some(idx) => before[idx + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        (line, col)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at {}.", self.message, self.offset)
    }
}

impl error::Error for ParseError {}

#[derive(Debug)]
pub enum Error {
    DuplicateRule(String),
    DuplicateToken(String),
    UnknownRule(String),
    UnknownToken(String),
    NoStartRule,
    Pattern {
        pattern: String,
        source: regex::Error,
    },
    Unresolved(String),
    /// A rule was re-entered at the offset where it is already being
    /// evaluated.
    LeftRecursion {
        rule: String,
        offset: usize,
    },
    RecursionLimit {
        depth: usize,
    },
    Parse(ParseError),
    NoMatch,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::DuplicateRule(ref name) => write!(f, "Rule '{}' already defined.", name),
            Error::DuplicateToken(ref name) => write!(f, "Token '{}' already defined.", name),
            Error::UnknownRule(ref name) => write!(f, "Rule '{}' is not defined.", name),
            Error::UnknownToken(ref name) => write!(f, "Token '{}' is not defined.", name),
            Error::NoStartRule => write!(f, "Grammar has no start rule"),
            Error::Pattern {
                ref pattern,
                ref source,
            } => write!(f, "invalid pattern /{}/: {}", pattern, source),
            Error::Unresolved(ref name) => {
                write!(f, "reference to '{}' was never resolved", name)
            }
            Error::LeftRecursion { ref rule, offset } => {
                write!(f, "Rule '{}' is left recursive at {}.", rule, offset)
            }
            Error::RecursionLimit { depth } => {
                write!(f, "recursion limit reached at depth {}", depth)
            }
            Error::Parse(ref err) => write!(f, "{}", err),
            Error::NoMatch => write!(f, "input did not match the start rule"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Pattern { ref source, .. } => Some(source),
            Error::Parse(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}
