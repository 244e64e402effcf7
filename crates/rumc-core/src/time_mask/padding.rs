//! Padding input and its single coercion step.

use serde_json::Value;

/// Padding supplied with an event, before coercion.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TimePadding {
    #[default]
    Absent,
    NumericString(String),
    Numeric(f64),
}

impl TimePadding {
    /// Resolve to a finite number of milliseconds, or `None` when the input
    /// is absent or not numeric.
    pub fn resolve(&self) -> Option<f64> {
        let n = match self {
            TimePadding::Absent => return None,
            TimePadding::Numeric(n) => *n,
            TimePadding::NumericString(s) => parse_numeric(s)?,
        };
        n.is_finite().then_some(n)
    }

    /// Padding from a JSON payload field: numbers and strings are taken,
    /// anything else (null, bool, objects) counts as absent. So does a number
    /// outside `f64` range such as `1e400`.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => n
                .as_f64()
                .map(TimePadding::Numeric)
                .unwrap_or(TimePadding::Absent),
            Some(Value::String(s)) => TimePadding::NumericString(s.clone()),
            _ => TimePadding::Absent,
        }
    }
}

impl From<f64> for TimePadding {
    fn from(n: f64) -> Self {
        TimePadding::Numeric(n)
    }
}

impl From<i64> for TimePadding {
    fn from(n: i64) -> Self {
        TimePadding::Numeric(n as f64)
    }
}

impl From<&str> for TimePadding {
    fn from(s: &str) -> Self {
        TimePadding::NumericString(s.to_string())
    }
}

impl<T: Into<TimePadding>> From<Option<T>> for TimePadding {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(TimePadding::Absent)
    }
}

/// Numeric coercion of a string: surrounding whitespace is ignored, the empty
/// string is zero, decimal/exponent forms and `0x`/`0o`/`0b` integers parse.
fn parse_numeric(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).ok().map(|n| n as f64);
    }
    // f64's parser also accepts "inf"/"nan" spellings; those end up
    // non-finite and are dropped by `resolve`.
    s.parse::<f64>().ok()
}
