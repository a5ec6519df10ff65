//! Typed cell contents and the string-to-value coercion layer.

use std::fmt;
use std::str::FromStr;

// ============================================================================
// Kind — the closed set of destination types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    Choice,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Bool => "boolean",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::String => "string",
            Kind::Choice => "choice",
        }
    }

    /// Width of numeric kinds in bits, 0 for the rest.
    pub fn bits(self) -> u32 {
        match self {
            Kind::Int8 | Kind::Uint8 => 8,
            Kind::Int16 | Kind::Uint16 => 16,
            Kind::Int32 | Kind::Uint32 | Kind::Float32 => 32,
            Kind::Int64 | Kind::Uint64 | Kind::Float64 => 64,
            Kind::Bool | Kind::String | Kind::Choice => 0,
        }
    }

    pub fn is_bool(self) -> bool {
        self == Kind::Bool
    }

    /// Whether an empty raw value is a legitimate assignment rather than
    /// a missing one.
    pub fn accepts_empty(self) -> bool {
        matches!(self, Kind::String | Kind::Choice)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// StoredValue — internal typed value storage
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Str(String),
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredValue::Bool(v) => write!(f, "{}", v),
            StoredValue::Int8(v) => write!(f, "{}", v),
            StoredValue::Int16(v) => write!(f, "{}", v),
            StoredValue::Int32(v) => write!(f, "{}", v),
            StoredValue::Int64(v) => write!(f, "{}", v),
            StoredValue::Uint8(v) => write!(f, "{}", v),
            StoredValue::Uint16(v) => write!(f, "{}", v),
            StoredValue::Uint32(v) => write!(f, "{}", v),
            StoredValue::Uint64(v) => write!(f, "{}", v),
            StoredValue::Float32(v) => write!(f, "{}", v),
            StoredValue::Float64(v) => write!(f, "{}", v),
            StoredValue::Str(v) => f.write_str(v),
        }
    }
}

impl StoredValue {
    /// `false`, `0`, `0.0` or `""`.
    pub fn is_zero(&self) -> bool {
        match self {
            StoredValue::Bool(v) => !v,
            StoredValue::Int8(v) => *v == 0,
            StoredValue::Int16(v) => *v == 0,
            StoredValue::Int32(v) => *v == 0,
            StoredValue::Int64(v) => *v == 0,
            StoredValue::Uint8(v) => *v == 0,
            StoredValue::Uint16(v) => *v == 0,
            StoredValue::Uint32(v) => *v == 0,
            StoredValue::Uint64(v) => *v == 0,
            StoredValue::Float32(v) => *v == 0.0,
            StoredValue::Float64(v) => *v == 0.0,
            StoredValue::Str(v) => v.is_empty(),
        }
    }
}

/// Trait for converting Rust values into StoredValue
pub trait IntoStoredValue {
    fn into_stored_value(self) -> StoredValue;
}

/// Trait for typed retrieval of a cell
pub trait FromStoredValue: Sized {
    fn from_stored_value(v: &StoredValue) -> Option<Self>;
}

macro_rules! stored_value_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl IntoStoredValue for $ty {
                fn into_stored_value(self) -> StoredValue {
                    StoredValue::$variant(self)
                }
            }

            impl FromStoredValue for $ty {
                fn from_stored_value(v: &StoredValue) -> Option<Self> {
                    match v {
                        StoredValue::$variant(n) => Some(Clone::clone(n)),
                        _ => None,
                    }
                }
            }
        )*
    };
}

stored_value_conversions! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    String => Str,
}

impl IntoStoredValue for &str {
    fn into_stored_value(self) -> StoredValue {
        StoredValue::Str(self.to_string())
    }
}

// ============================================================================
// Coercion
// ============================================================================

/// Why a raw token could not be turned into a value. The caller knows the
/// option name and builds the user-facing error from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    Missing,
    Invalid,
}

fn parse_as<T: FromStr>(raw: &str) -> Result<T, Rejection> {
    raw.parse().map_err(|_| Rejection::Invalid)
}

/// `str::parse` rounds an out-of-range literal to infinity; only an
/// explicit `inf`/`infinity` may produce one.
fn parse_float<T: FromStr + Into<f64> + Copy>(raw: &str) -> Result<T, Rejection> {
    let v: T = parse_as(raw)?;
    if v.into().is_infinite() && !is_infinity_literal(raw) {
        return Err(Rejection::Invalid);
    }
    Ok(v)
}

fn is_infinity_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    digits.eq_ignore_ascii_case("inf") || digits.eq_ignore_ascii_case("infinity")
}

/// Convert `raw` into a value of `kind`. `allowed` is only consulted for
/// [`Kind::Choice`] and holds every accepted value.
pub(crate) fn coerce(kind: Kind, allowed: &[String], raw: &str) -> Result<StoredValue, Rejection> {
    if raw.is_empty() && !kind.accepts_empty() {
        return Err(Rejection::Missing);
    }

    let value = match kind {
        Kind::Bool => StoredValue::Bool(parse_as(raw)?),
        Kind::Int8 => StoredValue::Int8(parse_as(raw)?),
        Kind::Int16 => StoredValue::Int16(parse_as(raw)?),
        Kind::Int32 => StoredValue::Int32(parse_as(raw)?),
        Kind::Int64 => StoredValue::Int64(parse_as(raw)?),
        Kind::Uint8 => StoredValue::Uint8(parse_as(raw)?),
        Kind::Uint16 => StoredValue::Uint16(parse_as(raw)?),
        Kind::Uint32 => StoredValue::Uint32(parse_as(raw)?),
        Kind::Uint64 => StoredValue::Uint64(parse_as(raw)?),
        Kind::Float32 => StoredValue::Float32(parse_float(raw)?),
        Kind::Float64 => StoredValue::Float64(parse_float(raw)?),
        Kind::String => StoredValue::Str(raw.to_string()),
        Kind::Choice => {
            if !allowed.iter().any(|c| c == raw) {
                return Err(Rejection::Invalid);
            }
            StoredValue::Str(raw.to_string())
        }
    };
    Ok(value)
}
