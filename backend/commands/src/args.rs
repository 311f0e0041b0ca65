//! Argument extraction: map the leftover tokens of a resolved command onto
//! its typed slots.

use crate::error::UsageError;
use crate::types::{ArgType, ArgValue, ArgumentDef, ParsedArgs};

const QUOTE_OPENERS: [char; 3] = ['\'', '"', '«'];
const QUOTE_CLOSERS: [char; 3] = ['\'', '"', '»'];

/// Coerce `tokens` into one value per slot in `defs`.
///
/// Slots are filled in index order and the first failure wins. Each slot
/// reads the token at its own index, so a quoted string spanning several
/// tokens does not shift the slots declared after it.
pub fn parse_arguments(defs: &[ArgumentDef], tokens: &[String]) -> Result<ParsedArgs, UsageError> {
    let mut ordered: Vec<&ArgumentDef> = defs.iter().collect();
    ordered.sort_by_key(|d| d.index);

    let mut parsed = ParsedArgs::default();
    for def in ordered {
        let Some(token) = tokens.get(def.index) else {
            return Err(UsageError::MissingArgument { name: def.name.clone() });
        };

        let value = match def.arg_type {
            ArgType::String => ArgValue::String(extract_string(tokens, def.index)),
            ArgType::Number => ArgValue::Number(parse_number(token)?),
            ArgType::Boolean => ArgValue::Boolean(parse_boolean(token)?),
        };
        parsed.insert(def.name.clone(), value);
    }
    Ok(parsed)
}

/// Read a string slot starting at `index`, joining a quoted run of tokens.
///
/// A token opening with `'`, `"` or `«` is joined with following tokens up
/// to the first one that ends with any closer, and the outer characters of
/// the joined text are dropped. Without a closer the token is returned
/// unchanged.
pub fn extract_string(tokens: &[String], index: usize) -> String {
    let Some(first) = tokens.get(index) else {
        return String::new();
    };
    if !first.starts_with(QUOTE_OPENERS) {
        return first.clone();
    }

    let closing = tokens[index..].iter().enumerate().find_map(|(offset, token)| {
        // A lone quote mark opens the run but cannot also close it.
        let closes = token.ends_with(QUOTE_CLOSERS) && (offset > 0 || token.chars().count() > 1);
        closes.then_some(index + offset)
    });

    match closing {
        Some(end) => strip_outer(&tokens[index..=end].join(" ")),
        None => first.clone(),
    }
}

fn strip_outer(text: &str) -> String {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

fn parse_number(token: &str) -> Result<i64, UsageError> {
    token.parse::<i64>().map_err(|_| UsageError::Conversion {
        token: token.to_string(),
        target: ArgType::Number,
    })
}

fn parse_boolean(token: &str) -> Result<bool, UsageError> {
    if token.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if token.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(UsageError::Conversion {
            token: token.to_string(),
            target: ArgType::Boolean,
        })
    }
}
