//! Positional operand slots and their arity rules.

use std::str::FromStr;

use crate::error::{Bound, ParseError};
use crate::options::Options;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Required,
    Optional,
}

impl FromStr for Arity {
    type Err = String;

    /// `""` is a required operand, `"?"` an optional one.
    fn from_str(marker: &str) -> Result<Self, Self::Err> {
        match marker {
            "" => Ok(Arity::Required),
            "?" => Ok(Arity::Optional),
            other => Err(format!("unsupported operand marker '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
struct OperandSlot {
    name: String,
    arity: Arity,
    value: String,
}

#[derive(Debug, Default)]
pub(crate) struct Operands {
    slots: Vec<OperandSlot>,
}

impl Operands {
    pub fn declare(&mut self, name: &str, arity: Arity) -> Result<(), String> {
        if self.slots.iter().any(|s| s.name == name) {
            return Err(format!("duplicate operand '{}'", name));
        }
        self.slots.push(OperandSlot {
            name: name.to_string(),
            arity,
            value: String::new(),
        });
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, name: &str) -> &str {
        self.slots
            .iter()
            .find(|s| s.name == name)
            .map_or("", |s| s.value.as_str())
    }

    pub fn specs(&self) -> impl Iterator<Item = (&str, Arity)> {
        self.slots.iter().map(|s| (s.name.as_str(), s.arity))
    }

    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.value.clear();
        }
    }

    /// Assign `residual` to the slots in declaration order, then check the
    /// count if `options` ask for it. Tokens beyond the last slot are
    /// dropped.
    pub fn bind(&mut self, residual: Vec<String>, options: &Options) -> Result<(), ParseError> {
        let given = residual.len();
        for (slot, token) in self.slots.iter_mut().zip(residual) {
            slot.value = token;
        }

        let max_slots = self.slots.len();
        let min_required = self
            .slots
            .iter()
            .filter(|s| s.arity == Arity::Required)
            .count();
        tracing::debug!(given, min_required, max_slots, "bound operands");

        if !options.strict_operands {
            return Ok(());
        }

        let violation = if min_required == max_slots {
            (given != max_slots).then_some((Bound::Exactly, max_slots))
        } else if given < min_required {
            Some((Bound::AtLeast, min_required))
        } else if given > max_slots && options.reject_extra_operands {
            Some((Bound::AtMost, max_slots))
        } else {
            None
        };

        match violation {
            Some((bound, count)) => Err(ParseError::OperandCount {
                bound,
                count,
                given,
            }),
            None => Ok(()),
        }
    }
}
