use std::fmt;

use crate::value::Kind;

/// Everything `Parser::parse` can fail with.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The option table itself is unusable (duplicate names, an option
    /// with no name, an unknown operand marker).
    #[error("invalid definition: {0}")]
    Definition(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(e) => Some(e),
            Error::Definition(_) => None,
        }
    }
}

/// Reports whether `err`, or anything in its `source()` chain, came from
/// parsing the command line rather than from some unrelated failure.
pub fn is_parse_error(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<ParseError>() {
            return true;
        }
        if let Some(Error::Parse(_)) = e.downcast_ref::<Error>() {
            return true;
        }
        current = e.source();
    }
    false
}

/// A problem with the tokens handed to the parser.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("no value for argument: {0}")]
    MissingValue(String),

    #[error("invalid value for argument {arg}: '{value}' is not a valid {kind} value")]
    InvalidValue {
        arg: String,
        value: String,
        kind: Kind,
    },

    #[error(
        "invalid value for argument {arg}: '{value}' is not a valid choice (possible values: {})",
        .possible.join(",")
    )]
    InvalidChoice {
        arg: String,
        value: String,
        possible: Vec<String>,
    },

    #[error("wrong number of operands: expected {bound} {count}, got {given}")]
    OperandCount {
        bound: Bound,
        count: usize,
        given: usize,
    },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::UnknownArgument(_) => ErrorKind::UnknownArgument,
            ParseError::MissingValue(_) => ErrorKind::MissingValue,
            ParseError::InvalidValue { kind, .. } => match kind {
                Kind::Bool => ErrorKind::InvalidBoolean,
                Kind::Int8 | Kind::Int16 | Kind::Int32 | Kind::Int64 => {
                    ErrorKind::InvalidInt(kind.bits())
                }
                Kind::Uint8 | Kind::Uint16 | Kind::Uint32 | Kind::Uint64 => {
                    ErrorKind::InvalidUint(kind.bits())
                }
                Kind::Float32 | Kind::Float64 => ErrorKind::InvalidFloat(kind.bits()),
                Kind::Choice => ErrorKind::InvalidChoice,
                // every string coerces, so this is never built for one
                Kind::String => unreachable!("string values cannot be invalid"),
            },
            ParseError::InvalidChoice { .. } => ErrorKind::InvalidChoice,
            ParseError::OperandCount { .. } => ErrorKind::OperandCount,
        }
    }
}

/// Classification of a [`ParseError`], carrying the destination width
/// for numeric failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownArgument,
    MissingValue,
    InvalidBoolean,
    InvalidInt(u32),
    InvalidUint(u32),
    InvalidFloat(u32),
    InvalidChoice,
    OperandCount,
}

/// Which side of the operand arity was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exactly,
    AtLeast,
    AtMost,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Exactly => write!(f, "exactly"),
            Bound::AtLeast => write!(f, "at least"),
            Bound::AtMost => write!(f, "at most"),
        }
    }
}
