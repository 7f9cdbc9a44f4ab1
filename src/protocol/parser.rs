//! Response parser
//!
//! Classifies the text of a `:NAME: VALUE` reply into a typed [`Value`].
//!
//! The value shapes are tried in a fixed order and the first structural match
//! wins:
//!
//! 1. quoted string   `"..."`
//! 2. float           `[+-]digits.digits[e[+-]digits]`
//! 3. unsigned int    `digits`
//! 4. control status  `RUN` | `STOP`
//! 5. boolean         `TRUE` | `FALSE`

use crate::error::{MatisseError, Result};
use super::{ControlStatus, Value};

type ShapeMatcher = fn(&str) -> Option<Value>;

/// Value shapes in priority order
const SHAPES: [(&str, ShapeMatcher); 5] = [
    ("string", match_string),
    ("float", match_float),
    ("integer", match_int),
    ("control status", match_status),
    ("boolean", match_bool),
];

/// Parse a reply into the echoed variable name and its value
pub fn parse_response(text: &str) -> Result<(String, Value)> {
    let (name, rest) = split_envelope(text)
        .ok_or_else(|| MatisseError::MalformedEnvelope(text.to_string()))?;

    for (shape, matcher) in SHAPES.iter() {
        if let Some(value) = matcher(rest) {
            tracing::trace!("Parsed {} as {}", text, shape);
            return Ok((name.to_string(), value));
        }
    }

    Err(MatisseError::UnrecognizedValueShape(text.to_string()))
}

/// Split `  :NAME: VALUE  ` into `NAME` and the trimmed `VALUE`
///
/// `NAME` is a run of non-whitespace that may itself contain colons
/// (`SPZT:NOW`). The last colon in that run that still leaves a non-empty
/// value behind ends the name.
fn split_envelope(text: &str) -> Option<(&str, &str)> {
    let body = text.trim_start().strip_prefix(':')?;
    let token_end = body
        .find(|c: char| c.is_whitespace())
        .unwrap_or(body.len());
    let token = &body[..token_end];

    token
        .char_indices()
        .rev()
        .filter(|&(pos, c)| c == ':' && pos > 0)
        .find_map(|(pos, _)| {
            let rest = body[pos + 1..].trim();
            if rest.is_empty() || rest.contains(['\n', '\r']) {
                None
            } else {
                Some((&body[..pos], rest))
            }
        })
}

fn match_string(value: &str) -> Option<Value> {
    let inner = value.strip_prefix('"')?.strip_suffix('"')?;
    if inner.is_empty() || inner.contains('"') {
        return None;
    }
    Some(Value::String(inner.to_string()))
}

fn match_float(value: &str) -> Option<Value> {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
        None => (unsigned, None),
    };

    let (int_part, frac_part) = mantissa.split_once('.')?;
    if !is_digits_or_empty(int_part) || !is_digits_or_empty(frac_part) {
        return None;
    }
    // A lone "." has no digits to convert
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    if let Some(exponent) = exponent {
        let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        if digits.is_empty() || !is_digits_or_empty(digits) {
            return None;
        }
    }

    // Rust wants a digit on both sides of the point
    let sign = &value[..value.len() - unsigned.len()];
    let normalized = format!(
        "{}{}.{}{}",
        sign,
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part },
        exponent.map(|e| format!("e{}", e)).unwrap_or_default(),
    );

    normalized.parse::<f64>().ok().map(Value::Float)
}

fn match_int(value: &str) -> Option<Value> {
    if value.is_empty() || !is_digits_or_empty(value) {
        return None;
    }
    value.parse::<u64>().ok().map(Value::Int)
}

fn match_status(value: &str) -> Option<Value> {
    value.parse::<ControlStatus>().ok().map(Value::Status)
}

fn match_bool(value: &str) -> Option<Value> {
    match value {
        "TRUE" => Some(Value::Bool(true)),
        "FALSE" => Some(Value::Bool(false)),
        _ => None,
    }
}

fn is_digits_or_empty(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
