//! The dynamic value domain the interpreter operates on (`spec.md` §3
//! "Value") and its pretty-printer for trace output (§4.3).

use std::fmt;

/// The four-variant dynamic value domain. Equality is by variant-then-content:
/// values of different variants are never equal, matching `#[derive(PartialEq)]`
/// on an enum with no cross-variant coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Number(f64),
    Text(String),
    Absent,
}

impl Value {
    /// Truthiness per `spec.md` §4.3: `Absent` is false, `Boolean` uses its
    /// own value, every other value is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Absent => false,
            Value::Boolean(b) => *b,
            Value::Number(_) | Value::Text(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Absent => "absent",
        }
    }
}

/// Renders a value the way the interpreter's trace output does:
/// `verdadero`/`falso` for booleans, fixed-point decimal with no trailing
/// zeros for numbers, double-quoted text, and an empty placeholder for
/// `Absent` (not currently reachable through user syntax per §4.3).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(true) => write!(f, "verdadero"),
            Value::Boolean(false) => write!(f, "falso"),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Absent => write!(f, ""),
        }
    }
}

/// Fixed-point rendering with no grouping separators, no trailing zeros
/// after the decimal point, and integers rendered without a fractional
/// part at all. `.` is always the decimal separator in this rendering
/// (source literals use `,`; this is output, not re-parsed).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    if n.fract() == 0.0 && n.abs() < 1e21 {
        return format!("{:.0}", n);
    }
    // Shortest fixed-point representation that round-trips back to `n`,
    // at most 17 fractional digits (21 significant digits overall).
    let mut s = format!("{:.17}", n);
    for precision in 0..=17 {
        let candidate = format!("{:.*}", precision, n);
        if candidate.parse::<f64>() == Ok(n) {
            s = candidate;
            break;
        }
    }
    trim_trailing_zeros(&s)
}

fn trim_trailing_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    let trimmed = s.trim_end_matches('0');
    let trimmed = trimmed.trim_end_matches('.');
    trimmed.to_string()
}
