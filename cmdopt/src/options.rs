/// Parser configuration.
///
/// Both toggles default to off. They can be set directly or chained:
///
/// ```
/// let options = cmdopt::Options::new().strict_operands(true);
/// assert!(options.strict_operands);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Fail the parse when the residual tokens do not fit the declared
    /// operands.
    pub strict_operands: bool,
    /// With `strict_operands`, also fail when there are more residual
    /// tokens than operand slots and at least one slot is optional.
    /// (When every slot is required the count must already be exact.)
    pub reject_extra_operands: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict_operands(mut self, on: bool) -> Self {
        self.strict_operands = on;
        self
    }

    pub fn reject_extra_operands(mut self, on: bool) -> Self {
        self.reject_extra_operands = on;
        self
    }
}
