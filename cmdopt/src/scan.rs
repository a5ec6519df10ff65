//! The single left-to-right pass over the argument vector.
//!
//! Scanning stops for good at the first bare token; that token and
//! everything after it are handed back untouched. A non-boolean option
//! takes the next token as its value whatever that token looks like.

use crate::error::ParseError;
use crate::registry::Registry;
use crate::value::StoredValue;

/// How a token is treated while options are still being scanned.
#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    /// `--name` or `--name=value`
    Long {
        name: &'a str,
        value: Option<&'a str>,
    },
    /// `-abc`, letters after the dash
    Short(&'a str),
    /// Anything else, including `-` and `--` on their own.
    Bare,
}

impl<'a> Token<'a> {
    fn classify(token: &'a str) -> Self {
        if token == "-" || token == "--" {
            return Token::Bare;
        }
        if let Some(body) = token.strip_prefix("--") {
            return match body.split_once('=') {
                Some((name, value)) => Token::Long {
                    name,
                    value: Some(value),
                },
                None => Token::Long {
                    name: body,
                    value: None,
                },
            };
        }
        match token.strip_prefix('-') {
            Some(cluster) => Token::Short(cluster),
            None => Token::Bare,
        }
    }
}

/// Bind every option in `tokens` up to the first bare token and return
/// the residual tokens.
pub(crate) fn scan(registry: &mut Registry, tokens: &[String]) -> Result<Vec<String>, ParseError> {
    let mut cursor = 0;
    while let Some(token) = tokens.get(cursor) {
        let next = tokens.get(cursor + 1).map(String::as_str);
        let consumed = match Token::classify(token) {
            Token::Long { name, value } => long_option(registry, token, name, value, next)?,
            Token::Short(cluster) => short_cluster(registry, token, cluster, next)?,
            Token::Bare => break,
        };
        cursor += 1 + consumed;
    }

    let residual = tokens[cursor..].to_vec();
    tracing::debug!(stopped_at = cursor, residual = residual.len(), "option scan finished");
    Ok(residual)
}

/// Returns how many tokens after `token` were consumed as its value.
fn long_option(
    registry: &mut Registry,
    token: &str,
    name: &str,
    attached: Option<&str>,
    next: Option<&str>,
) -> Result<usize, ParseError> {
    let (index, negated) = match registry.resolve_negated_long(name) {
        Some(index) => (index, true),
        None => match registry.resolve_long(name) {
            Some(index) => (index, false),
            None => return Err(ParseError::UnknownArgument(token.to_string())),
        },
    };
    let arg = format!("--{}", name);

    if let Some(raw) = attached {
        registry.assign_raw(index, &arg, raw, negated)?;
        tracing::trace!(option = %arg, value = raw, "bound attached value");
        return Ok(0);
    }

    if registry.spec(index).kind().is_bool() {
        registry.assign(index, StoredValue::Bool(!negated));
        tracing::trace!(option = %arg, "set flag");
        return Ok(0);
    }

    let raw = next.ok_or_else(|| ParseError::MissingValue(arg.clone()))?;
    registry.assign_raw(index, &arg, raw, false)?;
    tracing::trace!(option = %arg, value = raw, "bound next token");
    Ok(1)
}

/// Walk a cluster of short options. The first non-boolean letter takes the
/// rest of the cluster as its value, or the next token when it is last.
fn short_cluster(
    registry: &mut Registry,
    token: &str,
    cluster: &str,
    next: Option<&str>,
) -> Result<usize, ParseError> {
    for (offset, letter) in cluster.char_indices() {
        let index = registry
            .resolve_short(letter)
            .ok_or_else(|| ParseError::UnknownArgument(token.to_string()))?;

        if registry.spec(index).kind().is_bool() {
            registry.assign(index, StoredValue::Bool(true));
            tracing::trace!(option = %letter, "set flag");
            continue;
        }

        let arg = format!("-{}", letter);
        let rest = &cluster[offset + letter.len_utf8()..];
        if !rest.is_empty() {
            registry.assign_raw(index, &arg, rest, false)?;
            tracing::trace!(option = %arg, value = rest, "bound cluster remainder");
            return Ok(0);
        }

        let raw = next.ok_or_else(|| ParseError::MissingValue(arg.clone()))?;
        registry.assign_raw(index, &arg, raw, false)?;
        tracing::trace!(option = %arg, value = raw, "bound next token");
        return Ok(1);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OptionSpec;
    use crate::value::Kind;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    /// a, b, c booleans; s string; i int32 with long name aint.
    fn registry() -> Registry {
        let mut reg = Registry::default();
        for c in ['a', 'b', 'c'] {
            reg.push(OptionSpec::new("", Some(c), Kind::Bool, StoredValue::Bool(false), ""));
        }
        reg.push(OptionSpec::new(
            "astring",
            Some('s'),
            Kind::String,
            StoredValue::Str(String::new()),
            "",
        ));
        reg.push(OptionSpec::new("aint", Some('i'), Kind::Int32, StoredValue::Int32(0), ""));
        reg
    }

    fn flags(reg: &Registry) -> [bool; 3] {
        let get = |i| reg.value(i) == &StoredValue::Bool(true);
        [get(0), get(1), get(2)]
    }

    #[test]
    fn classify() {
        assert_eq!(Token::classify("foo"), Token::Bare);
        assert_eq!(Token::classify("-"), Token::Bare);
        assert_eq!(Token::classify("--"), Token::Bare);
        assert_eq!(Token::classify("-abc"), Token::Short("abc"));
        assert_eq!(
            Token::classify("--aint=5"),
            Token::Long {
                name: "aint",
                value: Some("5"),
            }
        );
        assert_eq!(
            Token::classify("--x=a=b"),
            Token::Long {
                name: "x",
                value: Some("a=b"),
            }
        );
        assert_eq!(
            Token::classify("--astring="),
            Token::Long {
                name: "astring",
                value: Some(""),
            }
        );
    }

    #[test]
    fn bundling_matches_separate_flags() {
        for args in [
            &["-abc"][..],
            &["-a", "-b", "-c"],
            &["-ab", "-c"],
            &["-ab", "-bc"],
            &["-cba"],
        ] {
            let mut reg = registry();
            scan(&mut reg, &tokens(args)).unwrap();
            assert_eq!(flags(&reg), [true, true, true], "{:?}", args);
        }
    }

    #[test]
    fn last_letter_takes_next_token() {
        let mut reg = registry();
        let rest = scan(&mut reg, &tokens(&["-abcs", "foo", "bar"])).unwrap();
        assert_eq!(flags(&reg), [true, true, true]);
        assert_eq!(reg.value(3), &StoredValue::Str("foo".into()));
        assert_eq!(rest, tokens(&["bar"]));
    }

    #[test]
    fn cluster_remainder_is_inline_value() {
        let mut reg = registry();
        let rest = scan(&mut reg, &tokens(&["-absc", "foo"])).unwrap();
        assert_eq!(flags(&reg), [true, true, false]);
        assert_eq!(reg.value(3), &StoredValue::Str("c".into()));
        assert_eq!(rest, tokens(&["foo"]));

        let mut reg = registry();
        scan(&mut reg, &tokens(&["-i42"])).unwrap();
        assert_eq!(reg.value(4), &StoredValue::Int32(42));

        // the remainder is taken verbatim, '=' included
        let mut reg = registry();
        scan(&mut reg, &tokens(&["-s=x"])).unwrap();
        assert_eq!(reg.value(3), &StoredValue::Str("=x".into()));
    }

    #[test]
    fn unknown_letter_names_whole_token_and_keeps_earlier_letters() {
        let mut reg = registry();
        let err = scan(&mut reg, &tokens(&["-abx"])).unwrap_err();
        assert_eq!(err, ParseError::UnknownArgument("-abx".into()));
        assert_eq!(flags(&reg), [true, true, false]);

        let mut reg = registry();
        let err = scan(&mut reg, &tokens(&["-ab", "-x"])).unwrap_err();
        assert_eq!(err, ParseError::UnknownArgument("-x".into()));
        assert_eq!(flags(&reg), [true, true, false]);
    }

    #[test]
    fn missing_value_at_end_of_cluster() {
        let mut reg = registry();
        let err = scan(&mut reg, &tokens(&["-abcs"])).unwrap_err();
        assert_eq!(err, ParseError::MissingValue("-s".into()));
        assert_eq!(flags(&reg), [true, true, true]);
    }

    #[test]
    fn next_token_is_swallowed_whatever_its_shape() {
        let mut reg = registry();
        let rest = scan(&mut reg, &tokens(&["--astring", "--aint", "5"])).unwrap();
        assert_eq!(reg.value(3), &StoredValue::Str("--aint".into()));
        assert_eq!(reg.value(4), &StoredValue::Int32(0));
        assert_eq!(rest, tokens(&["5"]));

        let mut reg = registry();
        scan(&mut reg, &tokens(&["-s", "-a"])).unwrap();
        assert_eq!(reg.value(3), &StoredValue::Str("-a".into()));
        assert_eq!(flags(&reg), [false, false, false]);
    }

    #[test]
    fn first_bare_token_stops_scanning() {
        let mut reg = registry();
        let rest = scan(&mut reg, &tokens(&["foo", "-i", "5"])).unwrap();
        assert_eq!(rest, tokens(&["foo", "-i", "5"]));
        assert_eq!(reg.value(4), &StoredValue::Int32(0));

        let mut reg = registry();
        let rest = scan(&mut reg, &tokens(&["-a", "--", "-b"])).unwrap();
        assert_eq!(rest, tokens(&["--", "-b"]));
        assert_eq!(flags(&reg), [true, false, false]);

        let mut reg = registry();
        let rest = scan(&mut reg, &tokens(&["-", "-a"])).unwrap();
        assert_eq!(rest, tokens(&["-", "-a"]));
    }

    #[test]
    fn unknown_long_names_full_token() {
        let mut reg = registry();
        let err = scan(&mut reg, &tokens(&["--x=5"])).unwrap_err();
        assert_eq!(err, ParseError::UnknownArgument("--x=5".into()));

        let mut reg = registry();
        let err = scan(&mut reg, &tokens(&["--no-aint"])).unwrap_err();
        assert_eq!(err, ParseError::UnknownArgument("--no-aint".into()));
    }

    #[test]
    fn long_missing_value() {
        let mut reg = registry();
        let err = scan(&mut reg, &tokens(&["--aint"])).unwrap_err();
        assert_eq!(err, ParseError::MissingValue("--aint".into()));

        let mut reg = registry();
        let err = scan(&mut reg, &tokens(&["--aint=", "5"])).unwrap_err();
        assert_eq!(err, ParseError::MissingValue("--aint".into()));
    }
}
