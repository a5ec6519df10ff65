//! Declared options and the cells that hold their values.

use std::fmt;
use std::marker::PhantomData;

use crate::error::ParseError;
use crate::value::{self, Kind, Rejection, StoredValue};

/// Handle to the cell of one registered option.
///
/// Read and write the cell through [`Parser::get`](crate::Parser::get) and
/// [`Parser::set`](crate::Parser::set).
pub struct Slot<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Slot<T> {
    pub(crate) fn new(index: usize) -> Self {
        Slot {
            index,
            _marker: PhantomData,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.index
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&self.index).finish()
    }
}

/// One declared option.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    long: Option<String>,
    short: Option<char>,
    kind: Kind,
    default: StoredValue,
    choices: Vec<String>,
    help: String,
}

impl OptionSpec {
    pub(crate) fn new(
        long: &str,
        short: Option<char>,
        kind: Kind,
        default: StoredValue,
        help: &str,
    ) -> Self {
        OptionSpec {
            long: (!long.is_empty()).then(|| long.to_string()),
            short,
            kind,
            default,
            choices: Vec::new(),
            help: help.to_string(),
        }
    }

    pub(crate) fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.choices = choices;
        self
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn default_value(&self) -> &StoredValue {
        &self.default
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// The values a choice accepts, and the list quoted back to the user
    /// when one is rejected: every declared choice, then the default.
    fn possible_values(&self) -> Vec<String> {
        let mut possible = self.choices.clone();
        possible.push(self.default.to_string());
        possible
    }

    fn rejection(&self, rejection: Rejection, arg: &str, raw: &str) -> ParseError {
        match rejection {
            Rejection::Missing => ParseError::MissingValue(arg.to_string()),
            Rejection::Invalid if self.kind == Kind::Choice => ParseError::InvalidChoice {
                arg: arg.to_string(),
                value: raw.to_string(),
                possible: self.possible_values(),
            },
            Rejection::Invalid => ParseError::InvalidValue {
                arg: arg.to_string(),
                value: raw.to_string(),
                kind: self.kind,
            },
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Option specs and their cells. `specs[i]` owns `values[i]`.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    specs: Vec<OptionSpec>,
    values: Vec<StoredValue>,
}

impl Registry {
    /// Reject a spec that has no name or collides with an earlier one.
    pub fn check(&self, spec: &OptionSpec) -> Result<(), String> {
        if spec.long.is_none() && spec.short.is_none() {
            return Err("option has neither a long nor a short name".to_string());
        }
        if let Some(long) = spec.long() {
            if self.resolve_long(long).is_some() {
                return Err(format!("duplicate option --{}", long));
            }
        }
        if let Some(c) = spec.short {
            if self.resolve_short(c).is_some() {
                return Err(format!("duplicate option -{}", c));
            }
        }
        Ok(())
    }

    /// Add `spec` and fill its cell with the default.
    pub fn push(&mut self, spec: OptionSpec) -> usize {
        let index = self.specs.len();
        self.values.push(spec.default.clone());
        self.specs.push(spec);
        index
    }

    /// Put the default back into every cell that holds its kind's zero
    /// value (`false`, `0`, `""`).
    pub fn refill_defaults(&mut self) {
        for (spec, value) in self.specs.iter().zip(self.values.iter_mut()) {
            if value.is_zero() {
                *value = spec.default.clone();
            }
        }
    }

    pub fn resolve_short(&self, c: char) -> Option<usize> {
        self.specs.iter().position(|s| s.short == Some(c))
    }

    pub fn resolve_long(&self, name: &str) -> Option<usize> {
        self.specs.iter().position(|s| s.long() == Some(name))
    }

    /// Resolve `no-<name>` to the boolean option `<name>`.
    pub fn resolve_negated_long(&self, name: &str) -> Option<usize> {
        let base = name.strip_prefix("no-")?;
        self.resolve_long(base)
            .filter(|&index| self.specs[index].kind.is_bool())
    }

    pub fn spec(&self, index: usize) -> &OptionSpec {
        &self.specs[index]
    }

    pub fn specs(&self) -> impl Iterator<Item = (&OptionSpec, &StoredValue)> {
        self.specs.iter().zip(self.values.iter())
    }

    pub fn value(&self, index: usize) -> &StoredValue {
        &self.values[index]
    }

    pub fn assign(&mut self, index: usize, value: StoredValue) {
        self.values[index] = value;
    }

    /// Coerce `raw` for the option at `index` and store it. `arg` is the
    /// option as the user spelled it, for error messages. A negated boolean
    /// stores the inverse of what `raw` says.
    pub fn assign_raw(
        &mut self,
        index: usize,
        arg: &str,
        raw: &str,
        negated: bool,
    ) -> Result<(), ParseError> {
        let spec = &self.specs[index];
        let allowed = match spec.kind {
            Kind::Choice => spec.possible_values(),
            _ => Vec::new(),
        };
        let value = match value::coerce(spec.kind, &allowed, raw) {
            Ok(StoredValue::Bool(b)) if negated => StoredValue::Bool(!b),
            Ok(v) => v,
            Err(rejection) => return Err(spec.rejection(rejection, arg, raw)),
        };
        self.values[index] = value;
        Ok(())
    }
}
