//! Locale-independent rendering of script literals
//!
//! Floats use a fixed number of decimals with trailing zeros trimmed, so
//! `1.0` renders as `1` and `0.12500` as `0.125`. Negative zero renders as `0`.

use std::fmt;
use std::io::{self, Write};

use crate::hair::geometry::Color3;

/// Display adapter for a float at fixed precision
#[derive(Debug, Clone, Copy)]
pub struct Fixed {
    pub value: f32,
    pub precision: usize,
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_nan() {
            return f.write_str("NaN");
        }
        if self.value.is_infinite() {
            return f.write_str(if self.value > 0.0 { "Infinity" } else { "-Infinity" });
        }

        let raw = format!("{:.*}", self.precision, self.value);
        let trimmed = if raw.contains('.') {
            raw.trim_end_matches('0').trim_end_matches('.')
        } else {
            raw.as_str()
        };
        if trimmed == "-0" {
            f.write_str("0")
        } else {
            f.write_str(trimmed)
        }
    }
}

pub fn format_int(value: i64) -> String {
    value.to_string()
}

pub fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Three comma separated components, as passed to a color constructor
pub fn format_color(color: Color3, precision: usize) -> String {
    format!(
        "{}, {}, {}",
        Fixed { value: color.r, precision },
        Fixed { value: color.g, precision },
        Fixed { value: color.b, precision },
    )
}

/// Line wrapping for long array literals
#[derive(Debug, Clone, Copy)]
pub struct ArrayLayout<'a> {
    /// Values per line before wrapping; 0 keeps the array on one line
    pub values_per_line: usize,
    /// Prefix written after each wrap
    pub indent: &'a str,
}

/// Writes the comma separated body of an array literal (no brackets)
pub fn write_array<W, I>(writer: &mut W, values: I, layout: ArrayLayout<'_>) -> io::Result<()>
where
    W: Write,
    I: IntoIterator,
    I::Item: fmt::Display,
{
    for (idx, value) in values.into_iter().enumerate() {
        if idx > 0 {
            if layout.values_per_line > 0 && idx % layout.values_per_line == 0 {
                write!(writer, ",\n{}", layout.indent)?;
            } else {
                writer.write_all(b", ")?;
            }
        }
        write!(writer, "{}", value)?;
    }
    Ok(())
}
