//! Lenient serde adapters for line-item numbers.
//!
//! Sale line items come back from the backend after being edited in a
//! table of free-form inputs, so a number may be missing, `null`, a numeric
//! string, or junk. These adapters decode such a field to `None` instead of
//! failing the whole sale; the recalculator then counts it as zero.
//!
//! ```text
//! 12.5      -> Some(12.50)
//! "12.5"    -> Some(12.50)
//! null      -> None
//! "abc"     -> None
//! (missing) -> None   (with #[serde(default)])
//! ```

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

use crate::money::Money;

/// `Option<Money>` in major units, lenient on input.
pub mod lenient_money {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(money) => serializer.serialize_f64(money.to_major()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Money>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => n.as_f64().and_then(Money::from_major),
            Value::String(s) => Money::parse_major(&s),
            _ => None,
        })
    }
}

/// `Option<i64>` counts, lenient on input. Fractional numbers truncate
/// toward zero, the way an integer input field reads them.
pub mod lenient_count {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => serializer.serialize_i64(*n),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        })
    }

    fn truncate(n: f64) -> Option<i64> {
        if n.is_finite() && n.abs() < i64::MAX as f64 {
            Some(n.trunc() as i64)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use crate::money::Money;

    #[derive(Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(default, with = "super::lenient_money")]
        price: Option<Money>,
        #[serde(default, with = "super::lenient_count")]
        qty: Option<i64>,
    }

    fn row(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numbers_and_numeric_strings_decode() {
        let r = row(r#"{"price": 12.5, "qty": 3}"#);
        assert_eq!(r.price, Some(Money::from_cents(1250)));
        assert_eq!(r.qty, Some(3));

        let r = row(r#"{"price": " 4.20 ", "qty": "7"}"#);
        assert_eq!(r.price, Some(Money::from_cents(420)));
        assert_eq!(r.qty, Some(7));

        let r = row(r#"{"qty": 2.9}"#);
        assert_eq!(r.qty, Some(2));
    }

    #[test]
    fn test_junk_decodes_to_none() {
        let r = row(r#"{"price": "abc", "qty": null}"#);
        assert_eq!(r.price, None);
        assert_eq!(r.qty, None);

        let r = row(r#"{"price": true, "qty": [1]}"#);
        assert_eq!(r.price, None);
        assert_eq!(r.qty, None);

        let r = row("{}");
        assert_eq!(r.price, None);
        assert_eq!(r.qty, None);
    }

    #[test]
    fn test_serializes_none_as_null() {
        let json = serde_json::to_value(Row { price: None, qty: Some(2) }).unwrap();
        assert!(json["price"].is_null());
        assert_eq!(json["qty"], 2);
    }
}
