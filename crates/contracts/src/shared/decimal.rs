//! Serde helpers for backend decimal fields.
//!
//! The backend renders `DecimalField` values as JSON strings (`"1250.00"`),
//! while computed fields may arrive as plain numbers. Both forms are read
//! into `f64`; outgoing values are written back as two-decimal strings.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Number(f64),
    Text(String),
}

fn parse_raw<E: serde::de::Error>(raw: RawDecimal) -> Result<Option<f64>, E> {
    match raw {
        RawDecimal::Number(n) => Ok(Some(n)),
        RawDecimal::Text(s) if s.trim().is_empty() => Ok(None),
        RawDecimal::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| E::custom(format!("invalid decimal '{}': {}", s, e))),
    }
}

pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{:.2}", value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawDecimal::deserialize(deserializer)?;
    parse_raw::<D::Error>(raw)?.ok_or_else(|| D::Error::custom("empty decimal"))
}

/// Same as the parent module, for nullable columns.
pub mod option {
    use super::{parse_raw, RawDecimal};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&format!("{:.2}", v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawDecimal>::deserialize(deserializer)? {
            Some(raw) => parse_raw::<D::Error>(raw),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Price {
        #[serde(with = "crate::shared::decimal")]
        amount: f64,
        #[serde(default, with = "crate::shared::decimal::option")]
        discount: Option<f64>,
    }

    #[test]
    fn test_reads_string_and_number() {
        let p: Price = serde_json::from_str(r#"{"amount":"1250.50","discount":3}"#).unwrap();
        assert_eq!(p.amount, 1250.5);
        assert_eq!(p.discount, Some(3.0));

        let p: Price = serde_json::from_str(r#"{"amount":12}"#).unwrap();
        assert_eq!(p.amount, 12.0);
        assert_eq!(p.discount, None);
    }

    #[test]
    fn test_null_and_blank_optional() {
        let p: Price = serde_json::from_str(r#"{"amount":"1","discount":null}"#).unwrap();
        assert_eq!(p.discount, None);
        let p: Price = serde_json::from_str(r#"{"amount":"1","discount":""}"#).unwrap();
        assert_eq!(p.discount, None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Price>(r#"{"amount":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Price>(r#"{"amount":""}"#).is_err());
    }

    #[test]
    fn test_writes_two_decimal_string() {
        let json = serde_json::to_value(Price {
            amount: 7.5,
            discount: None,
        })
        .unwrap();
        assert_eq!(json["amount"], "7.50");
        assert!(json["discount"].is_null());
    }
}
