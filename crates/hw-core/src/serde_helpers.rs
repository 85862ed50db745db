//! Helpers for reading loosely-typed configuration values.
//!
//! Config documents arrive from YAML, JSON, or templated sources where a
//! number may show up as `3`, `3.0`, or `"3"`. These helpers convert such a
//! [`serde_yaml::Value`] into the concrete type or describe why they can't.

use serde::Serializer;
use serde_yaml::Value;
use std::time::Duration;

/// Read a non-negative whole number from an int, a whole float, or a numeric string.
pub(crate) fn value_as_u64(value: &Value) -> Result<u64, String> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return Ok(u);
            }
            match n.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(f as u64),
                _ => Err(format!("expected a non-negative whole number, got {n}")),
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<u64>()
                .or_else(|_| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u32::MAX as f64)
                        .map(|f| f as u64)
                        .ok_or(())
                })
                .map_err(|_| format!("expected a whole number, got '{s}'"))
        }
        other => Err(format!("expected a number, got {}", describe(other))),
    }
}

/// Read a boolean from a bool or a `"true"` / `"false"` string.
pub(crate) fn value_as_bool(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" => Ok(true),
            "false" | "no" | "off" => Ok(false),
            _ => Err(format!("expected a boolean, got '{s}'")),
        },
        other => Err(format!("expected a boolean, got {}", describe(other))),
    }
}

/// Read a duration from a number of seconds or a string such as `250ms`, `5s`, `10m`, `1h`.
pub(crate) fn value_as_duration(value: &Value) -> Result<Duration, String> {
    match value {
        Value::Number(_) => value_as_u64(value).map(Duration::from_secs),
        Value::String(s) => parse_duration(s),
        other => Err(format!("expected a duration, got {}", describe(other))),
    }
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let parse = |digits: &str| {
        digits
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("invalid duration '{s}': {e}"))
    };
    if let Some(ms) = s.strip_suffix("ms") {
        parse(ms).map(Duration::from_millis)
    } else if let Some(secs) = s.strip_suffix('s') {
        parse(secs).map(Duration::from_secs)
    } else if let Some(mins) = s.strip_suffix('m') {
        scaled(parse(mins)?, 60)
    } else if let Some(hours) = s.strip_suffix('h') {
        scaled(parse(hours)?, 3600)
    } else {
        parse(s).map(Duration::from_secs)
    }
}

fn scaled(value: u64, unit_secs: u64) -> Result<Duration, String> {
    value
        .checked_mul(unit_secs)
        .map(Duration::from_secs)
        .ok_or_else(|| "duration out of range".to_string())
}

/// Serialize a duration in the same compact form the parser accepts.
pub(crate) fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let millis = duration.as_millis();
    if millis % 1000 != 0 {
        serializer.serialize_str(&format!("{millis}ms"))
    } else {
        serializer.serialize_str(&format!("{}s", duration.as_secs()))
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
