use crate::error::{Error, Result};
use crate::operand::{Arity, Operands};
use crate::options::Options;
use crate::registry::{OptionSpec, Registry, Slot};
use crate::scan;
use crate::value::{FromStoredValue, IntoStoredValue, Kind, StoredValue};

/// Declared options and operands, and the values bound to them.
///
/// ```
/// let mut parser = cmdopt::Parser::new();
/// let verbose = parser.bool("verbose", 'v', false, "say more");
/// let level = parser.uint8("level", 'l', 1, "compression level");
/// parser.add_operand("file", "");
///
/// parser.parse(["-v", "--level=9", "out.txt"]).unwrap();
/// assert!(parser.get(verbose));
/// assert_eq!(parser.get(level), 9);
/// assert_eq!(parser.operand("file"), "out.txt");
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    registry: Registry,
    operands: Operands,
    options: Options,
    args: Vec<String>,
    // first bad declaration, reported by the next parse
    definition_error: Option<String>,
}

macro_rules! register_fns {
    ($($(#[$doc:meta])* $fn_name:ident: $ty:ty => $kind:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $fn_name(
                &mut self,
                long: &str,
                short: impl Into<Option<char>>,
                default: $ty,
                help: &str,
            ) -> Slot<$ty> {
                self.register(OptionSpec::new(
                    long,
                    short.into(),
                    Kind::$kind,
                    default.into_stored_value(),
                    help,
                ))
            }
        )*
    };
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Parser {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// A rejected declaration still gets a cell, so its handle can be read
    /// and written, but no token ever resolves to it.
    fn register<T>(&mut self, spec: OptionSpec) -> Slot<T> {
        if let Err(msg) = self.registry.check(&spec) {
            self.record_definition_error(msg);
        }
        Slot::new(self.registry.push(spec))
    }

    fn record_definition_error(&mut self, msg: String) {
        tracing::debug!(error = %msg, "rejected declaration");
        self.definition_error.get_or_insert(msg);
    }

    register_fns! {
        /// A flag. `--name` and `-x` set it, `--no-name` clears it and
        /// `--name=false` sets it explicitly.
        bool: bool => Bool,
        int8: i8 => Int8,
        int16: i16 => Int16,
        int32: i32 => Int32,
        int64: i64 => Int64,
        uint8: u8 => Uint8,
        uint16: u16 => Uint16,
        uint32: u32 => Uint32,
        uint64: u64 => Uint64,
        float32: f32 => Float32,
        float64: f64 => Float64,
    }

    /// A free-form string. Unlike every other kind, `--name=` assigns the
    /// empty string instead of failing.
    pub fn string(
        &mut self,
        long: &str,
        short: impl Into<Option<char>>,
        default: &str,
        help: &str,
    ) -> Slot<String> {
        self.register(OptionSpec::new(
            long,
            short.into(),
            Kind::String,
            default.into_stored_value(),
            help,
        ))
    }

    /// A string restricted to `choices`. The default is accepted as well,
    /// whether or not it is one of them.
    pub fn choice(
        &mut self,
        choices: &[&str],
        long: &str,
        short: impl Into<Option<char>>,
        default: &str,
        help: &str,
    ) -> Slot<String> {
        let choices = choices.iter().map(|c| c.to_string()).collect();
        self.register(
            OptionSpec::new(
                long,
                short.into(),
                Kind::Choice,
                default.into_stored_value(),
                help,
            )
            .with_choices(choices),
        )
    }

    /// Declare the next positional operand. `marker` is `""` for a
    /// required operand and `"?"` for an optional one.
    pub fn add_operand(&mut self, name: &str, marker: &str) {
        let declared = marker
            .parse::<Arity>()
            .and_then(|arity| self.operands.declare(name, arity));
        if let Err(msg) = declared {
            self.record_definition_error(msg);
        }
    }

    // ------------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------------

    /// Bind `tokens` (without the program name) to the declared options
    /// and operands.
    ///
    /// On failure, values bound before the offending token keep their new
    /// values.
    pub fn parse<I, S>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(msg) = &self.definition_error {
            return Err(Error::Definition(msg.clone()));
        }

        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        self.args.clear();
        self.operands.reset();
        self.registry.refill_defaults();

        let residual = scan::scan(&mut self.registry, &tokens)?;
        if self.operands.is_empty() {
            self.args = residual;
        } else {
            self.operands.bind(residual, &self.options)?;
        }
        tracing::debug!(tokens = tokens.len(), args = self.args.len(), "parsed");
        Ok(())
    }

    /// Parse the arguments this process was started with.
    pub fn parse_env(&mut self) -> Result<()> {
        self.parse(std::env::args().skip(1))
    }

    // ------------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------------

    /// Current value of an option.
    ///
    /// # Panics
    ///
    /// If `slot` was handed out by a different parser.
    pub fn get<T: FromStoredValue>(&self, slot: Slot<T>) -> T {
        match T::from_stored_value(self.registry.value(slot.index())) {
            Some(v) => v,
            None => panic!("{:?} does not belong to this parser", slot),
        }
    }

    /// Overwrite an option's value. A value other than the kind's zero
    /// (`false`, `0`, `""`) survives the next parse unless a token assigns
    /// the option; a zero value is replaced by the declared default when
    /// parsing starts.
    ///
    /// # Panics
    ///
    /// If `slot` was handed out by a different parser.
    pub fn set<T: IntoStoredValue + FromStoredValue>(&mut self, slot: Slot<T>, value: T) {
        let value = value.into_stored_value();
        let current = self.registry.value(slot.index());
        if std::mem::discriminant(current) != std::mem::discriminant(&value) {
            panic!("{:?} does not belong to this parser", slot);
        }
        self.registry.assign(slot.index(), value);
    }

    /// The token bound to operand `name`, or `""`.
    pub fn operand(&self, name: &str) -> &str {
        self.operands.get(name)
    }

    /// Tokens left after option scanning. Always empty when operands are
    /// declared.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Every declared option with its current value, in declaration order.
    pub fn specs(&self) -> impl Iterator<Item = (&OptionSpec, &StoredValue)> {
        self.registry.specs()
    }

    pub fn operand_specs(&self) -> impl Iterator<Item = (&str, Arity)> {
        self.operands.specs()
    }
}
