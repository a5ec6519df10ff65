//! Declares one option of every kind, parses its own arguments and prints
//! what got bound, one `name=value` line each.
//!
//! Operands are declared from `OPTDUMP_OPERANDS` (comma separated, a
//! trailing `?` marks an optional one). `OPTDUMP_STRICT=1` turns on strict
//! operand counting. `RUST_LOG=cmdopt=trace` shows every binding.

use std::env;
use std::process::ExitCode;

use cmdopt::{Options, Parser};

fn declare(parser: &mut Parser) {
    parser.bool("abool", 'b', false, "a boolean");
    parser.int8("aint8", None, 0, "an int8");
    parser.int16("aint16", None, 0, "an int16");
    parser.int32("aint", 'i', 0, "an int32");
    parser.int64("aint64", None, 0, "an int64");
    parser.uint8("auint8", None, 0, "an uint8");
    parser.uint16("auint16", None, 0, "an uint16");
    parser.uint32("auint", 'u', 0, "an uint32");
    parser.uint64("auint64", None, 0, "an uint64");
    parser.float32("afloat32", 'f', 0.0, "a float32");
    parser.float64("afloat64", 'd', 0.0, "a float64");
    parser.string("astring", 's', "", "a string");
    parser.choice(&["foo", "bar", "baz"], "achoice", 'c', "default", "one of foo, bar, baz");

    if let Ok(list) = env::var("OPTDUMP_OPERANDS") {
        for decl in list.split(',').filter(|d| !d.is_empty()) {
            match decl.strip_suffix('?') {
                Some(name) => parser.add_operand(name, "?"),
                None => parser.add_operand(decl, ""),
            }
        }
    }
}

fn strict_from_env() -> bool {
    env::var("OPTDUMP_STRICT").is_ok_and(|v| !v.is_empty() && v != "0")
}

fn dump(parser: &Parser) {
    for (spec, value) in parser.specs() {
        let name = match (spec.long(), spec.short()) {
            (Some(long), _) => long.to_string(),
            (None, Some(c)) => c.to_string(),
            (None, None) => continue,
        };
        println!("{}={}", name, value);
    }
    for (name, _) in parser.operand_specs() {
        println!("operand {}={}", name, parser.operand(name));
    }
    for (i, arg) in parser.args().iter().enumerate() {
        println!("arg[{}]={}", i, arg);
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut parser = Parser::with_options(Options::new().strict_operands(strict_from_env()));
    declare(&mut parser);

    if let Err(e) = parser.parse_env() {
        eprintln!("optdump: {}", e);
        if e.is_parse_error() {
            tracing::debug!(kind = ?e.as_parse_error().map(|p| p.kind()), "parse failed");
            return ExitCode::from(2);
        }
        return ExitCode::FAILURE;
    }

    dump(&parser);
    ExitCode::SUCCESS
}
