//! Display formatting for money and timestamps.

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A dollar amount held as integer cents.
///
/// The backend sends balances as either strings (`"12.50"`) or numbers
/// (`12.5`); both deserialize here. Missing, null or garbage values read as
/// zero, and the value always serializes back as a two-decimal string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub const fn from_dollars(dollars: i64) -> Self {
        Self {
            cents: dollars * 100,
        }
    }

    pub const fn cents(self) -> i64 {
        self.cents
    }

    /// Parse a decimal amount; anything unparseable is zero.
    pub fn parse(text: &str) -> Self {
        text.trim()
            .parse::<f64>()
            .ok()
            .map(Self::from_f64)
            .unwrap_or_default()
    }

    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Self {
                cents: (value * 100.0).round() as i64,
            }
        } else {
            Self::ZERO
        }
    }

    fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map(Self::from_f64).unwrap_or_default(),
            serde_json::Value::String(s) => Self::parse(s),
            _ => Self::ZERO,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// Render a backend timestamp for tables. Missing values show `-`; values
/// that don't parse are shown as-is.
pub fn format_timestamp(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "-".to_string();
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return naive.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

/// Join first/last name, or `-` when both are blank.
pub fn display_name(first: &str, last: &str) -> String {
    let joined = [first.trim(), last.trim()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

/// Show `-` for blank optional text.
pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_string_and_number() {
        let from_str: Money = serde_json::from_str("\"12.50\"").unwrap();
        let from_num: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(from_str, from_num);
        assert_eq!(from_str.to_string(), "12.50");
    }

    #[test]
    fn test_money_garbage_is_zero() {
        let garbage: Money = serde_json::from_str("\"abc\"").unwrap();
        let null: Money = serde_json::from_str("null").unwrap();
        assert_eq!(garbage, Money::ZERO);
        assert_eq!(null.to_string(), "0.00");
    }

    #[test]
    fn test_money_rounding_and_sign() {
        assert_eq!(Money::parse("3.999").to_string(), "4.00");
        assert_eq!(Money::parse(" 5 ").cents(), 500);
        assert_eq!(Money::from_cents(-250).to_string(), "-2.50");
        assert_eq!(Money::from_dollars(20).to_string(), "20.00");
    }

    #[test]
    fn test_money_serializes_as_string() {
        let json = serde_json::to_string(&Money::from_cents(1250)).unwrap();
        assert_eq!(json, "\"12.50\"");
    }

    #[test]
    fn test_timestamp_formatting() {
        assert_eq!(format_timestamp(None), "-");
        assert_eq!(format_timestamp(Some("  ")), "-");
        assert_eq!(format_timestamp(Some("yesterday")), "yesterday");
        assert_eq!(
            format_timestamp(Some("2026-02-22 10:30:00")),
            "2026-02-22 10:30"
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("Ada", "Lovelace"), "Ada Lovelace");
        assert_eq!(display_name("", "Lovelace"), "Lovelace");
        assert_eq!(display_name(" ", ""), "-");
    }
}
