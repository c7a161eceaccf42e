//! Cell content formatting for date and number columns.
//!
//! A cell's raw [`Value`] passes through unchanged unless its column
//! declares a [`DataType`]. Date columns format timestamps with a strftime
//! pattern (optionally translating raw epoch seconds first); number columns
//! format only when a pattern is present — a numeric column without a
//! pattern still passes raw values through.

use chrono::{DateTime, Utc};
use std::fmt::Write as _;

use super::columns::{ColumnSpec, DataType};
use super::types::{Error, Value};

/// Strftime pattern used by date columns that don't declare one.
pub const DEFAULT_DATE_FORMAT: &str = "%B %d, %Y %H:%M";

/// Renders a cell's display text for the given column.
///
/// `Value::Null` always renders as an empty cell, before any formatter
/// runs; a missing field is not a formatting error.
pub(super) fn format_cell(column: &ColumnSpec, value: &Value) -> Result<String, Error> {
    if value.is_null() {
        return Ok(String::new());
    }
    match column.data_type {
        Some(DataType::Date) => format_date(column, value),
        Some(DataType::Number) => match column.data_format.as_deref() {
            Some(pattern) => format_number(pattern, value),
            // No pattern means numeric columns show the raw value.
            None => Ok(value.to_string()),
        },
        None => Ok(value.to_string()),
    }
}

fn format_date(column: &ColumnSpec, value: &Value) -> Result<String, Error> {
    let dt: DateTime<Utc> = if column.need_translate {
        // Raw value is epoch seconds (possibly fractional); millisecond
        // precision is kept through the conversion.
        let secs = value.as_f64().ok_or_else(|| Error::EpochValue {
            value: value.to_string(),
        })?;
        DateTime::from_timestamp_millis((secs * 1000.0) as i64).ok_or_else(|| {
            Error::EpochValue {
                value: value.to_string(),
            }
        })?
    } else {
        match value {
            Value::DateTime(dt) => *dt,
            other => {
                return Err(Error::DateValue {
                    value: other.to_string(),
                })
            }
        }
    };

    let pattern = column.data_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
    let mut out = String::new();
    write!(out, "{}", dt.format(pattern)).map_err(|_| Error::DateFormat {
        pattern: pattern.to_string(),
    })?;
    Ok(out)
}

#[derive(Debug, Clone, Copy)]
enum Verb {
    Fixed,
    Integer,
    Percent,
}

#[derive(Debug, Clone, Copy)]
struct NumberPattern {
    grouped: bool,
    precision: Option<usize>,
    verb: Verb,
}

/// Parses the supported pattern subset: an optional `,` grouping flag, an
/// optional `.N` precision, and a final `f`, `d`, or `%` verb.
fn parse_pattern(pattern: &str) -> Option<NumberPattern> {
    let mut rest = pattern;
    let grouped = rest.starts_with(',');
    if grouped {
        rest = &rest[1..];
    }
    let verb = match rest.chars().last()? {
        'f' => Verb::Fixed,
        'd' => Verb::Integer,
        '%' => Verb::Percent,
        _ => return None,
    };
    let body = &rest[..rest.len() - 1];
    let precision = if body.is_empty() {
        None
    } else {
        Some(body.strip_prefix('.')?.parse::<usize>().ok()?)
    };
    Some(NumberPattern {
        grouped,
        precision,
        verb,
    })
}

fn format_number(pattern: &str, value: &Value) -> Result<String, Error> {
    let spec = parse_pattern(pattern).ok_or_else(|| Error::NumberFormat {
        pattern: pattern.to_string(),
    })?;
    let x = value.as_f64().ok_or_else(|| Error::NumberValue {
        value: value.to_string(),
    })?;

    let formatted = match spec.verb {
        Verb::Fixed => format!("{:.*}", spec.precision.unwrap_or(6), x),
        Verb::Integer => format!("{}", x.round() as i64),
        Verb::Percent => format!("{:.*}%", spec.precision.unwrap_or(6), x * 100.0),
    };

    if spec.grouped {
        Ok(group_thousands(&formatted))
    } else {
        Ok(formatted)
    }
}

/// Inserts comma separators into the integer part of an already formatted
/// number, leaving sign and decimals intact.
fn group_thousands(s: &str) -> String {
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, tail) = match unsigned.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => unsigned.split_at(idx),
        None => (unsigned, ""),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().rev().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    format!("{}{}{}", sign, int_grouped, tail)
}
