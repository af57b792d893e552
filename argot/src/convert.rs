use std::num::IntErrorKind;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value::Value;

/// A string-to-value conversion shared by every parse call over the
/// same declared parser. `Send + Sync` so definitions can be read from
/// concurrent parses.
pub type Converter = Arc<dyn Fn(&str) -> Result<Value> + Send + Sync>;

/// Resolves a type name to its built-in converter.
///
/// Unknown names fall back to the identity string converter; that is a
/// deliberate permissive default, not an error.
pub fn converter_for(type_name: &str) -> Converter {
    match type_name {
        "int" => Arc::new(convert_int),
        "float" | "double" => Arc::new(convert_float),
        "bool" => Arc::new(convert_bool),
        _ => Arc::new(|raw: &str| Ok(Value::Str(raw.to_string()))),
    }
}

/// Wraps a fallible user conversion so failures surface as
/// `Error::Conversion` carrying the offending raw value.
pub fn custom_converter<F>(convert: F) -> Converter
where
    F: Fn(&str) -> std::result::Result<Value, String> + Send + Sync + 'static,
{
    Arc::new(move |raw: &str| {
        convert(raw).map_err(|message| {
            Error::conversion(
                raw,
                format!("custom conversion failed for '{raw}': {message}"),
            )
        })
    })
}

fn convert_int(raw: &str) -> Result<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::conversion(
            raw,
            "empty string cannot be converted to int".to_string(),
        ));
    }
    match trimmed.parse::<i64>() {
        Ok(value) => Ok(Value::Int(value)),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Err(Error::conversion(
                raw,
                format!("int value out of range: '{raw}'"),
            )),
            _ => Err(Error::conversion(
                raw,
                format!("invalid int value: '{raw}'"),
            )),
        },
    }
}

fn convert_float(raw: &str) -> Result<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::conversion(
            raw,
            "empty string cannot be converted to float".to_string(),
        ));
    }
    let value: f64 = trimmed.parse().map_err(|_| {
        Error::conversion(raw, format!("invalid float value: '{raw}'"))
    })?;
    // A finite-looking literal that parsed to infinity overflowed f64.
    if value.is_infinite() && trimmed.chars().any(|ch| ch.is_ascii_digit()) {
        return Err(Error::conversion(
            raw,
            format!("float value out of range: '{raw}'"),
        ));
    }
    Ok(Value::Float(value))
}

fn convert_bool(raw: &str) -> Result<Value> {
    let lowered = raw.trim().to_ascii_lowercase();
    if lowered.is_empty() {
        return Err(Error::conversion(
            raw,
            "empty string cannot be converted to bool".to_string(),
        ));
    }
    match lowered.as_str() {
        "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
        "false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
        _ => Err(Error::conversion(
            raw,
            format!("invalid bool value: '{raw}' (expected: true/false, 1/0, yes/no, on/off)"),
        )),
    }
}
