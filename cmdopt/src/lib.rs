//! Strict left-to-right command-line option and operand parsing.
//!
//! Options are declared on a [`Parser`] with a long name, a short letter or
//! both; each declaration returns a typed [`Slot`] whose cell starts out at
//! the declared default. [`Parser::parse`] then walks the arguments once:
//!
//! - `--name value`, `--name=value`, `--flag`, `--no-flag`
//! - `-abc` clusters of flags, where a value-taking letter takes the rest of
//!   the cluster or the following token as its value
//! - the first token that is not an option ends option scanning; it and
//!   everything after it are bound to the declared operands, or returned by
//!   [`Parser::args`] when there are none
//!
//! ```
//! use cmdopt::{Options, Parser};
//!
//! let mut parser = Parser::with_options(Options::new().strict_operands(true));
//! let count = parser.int32("count", 'n', 1, "how many");
//! let mode = parser.choice(&["fast", "slow"], "mode", None, "fast", "speed");
//! parser.add_operand("src", "");
//! parser.add_operand("dst", "?");
//!
//! parser.parse(["-n", "3", "--mode=slow", "a.txt", "--not-an-option"]).unwrap();
//! assert_eq!(parser.get(count), 3);
//! assert_eq!(parser.get(mode), "slow");
//! assert_eq!(parser.operand("src"), "a.txt");
//! assert_eq!(parser.operand("dst"), "--not-an-option");
//! ```

mod error;
mod operand;
mod options;
mod parser;
mod registry;
mod scan;
mod value;

pub use error::{is_parse_error, Bound, Error, ErrorKind, ParseError, Result};
pub use operand::Arity;
pub use options::Options;
pub use parser::Parser;
pub use registry::{OptionSpec, Slot};
pub use value::{FromStoredValue, IntoStoredValue, Kind, StoredValue};
