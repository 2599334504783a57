//! Deserializers for numeric fields the API sends either as numbers or as
//! numeric strings (`"quantity": "2"`).

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn into_f64<E: de::Error>(self) -> Result<f64, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("expected a number, got {:?}", s))),
        }
    }
}

pub fn f64_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = NumberOrString::deserialize(deserializer)?.into_f64::<D::Error>()?;
    if !value.is_finite() {
        return Err(de::Error::custom("expected a finite number"));
    }
    Ok(value)
}

pub fn u32_from_number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = NumberOrString::deserialize(deserializer)?.into_f64::<D::Error>()?;
    if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
        return Err(de::Error::custom(format!("expected a whole number, got {}", value)));
    }
    Ok(value as u32)
}

/// Отсутствующее, пустое или нечисловое значение даёт `None`
pub fn option_f64_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Integer(i64),
    Text(String),
}

/// Ids that arrive as `5` or as `"p-5"`
pub fn string_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Integer(n) => n.to_string(),
        IdRepr::Text(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "u32_from_number_or_string")]
        quantity: u32,
        #[serde(deserialize_with = "f64_from_number_or_string")]
        weight: f64,
    }

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        let a: Sample = serde_json::from_str(r#"{"quantity": 3, "weight": 12.5}"#).unwrap();
        assert_eq!((a.quantity, a.weight), (3, 12.5));

        let b: Sample = serde_json::from_str(r#"{"quantity": "4", "weight": " 7 "}"#).unwrap();
        assert_eq!((b.quantity, b.weight), (4, 7.0));
    }

    #[derive(Deserialize)]
    struct Budgeted {
        #[serde(deserialize_with = "string_from_string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "option_f64_from_number_or_string")]
        budget: Option<f64>,
    }

    #[test]
    fn test_optional_number_and_id_shapes() {
        let a: Budgeted = serde_json::from_str(r#"{"id": 5, "budget": "100"}"#).unwrap();
        assert_eq!(a.id, "5");
        assert_eq!(a.budget, Some(100.0));

        let b: Budgeted = serde_json::from_str(r#"{"id": "p-1", "budget": null}"#).unwrap();
        assert_eq!(b.id, "p-1");
        assert_eq!(b.budget, None);

        let c: Budgeted = serde_json::from_str(r#"{"id": "p-2", "budget": ""}"#).unwrap();
        assert_eq!(c.budget, None);

        let d: Budgeted = serde_json::from_str(r#"{"id": "p-3"}"#).unwrap();
        assert_eq!(d.budget, None);
    }

    #[test]
    fn test_rejects_fractional_quantity() {
        assert!(serde_json::from_str::<Sample>(r#"{"quantity": 1.5, "weight": 1}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"quantity": "x", "weight": 1}"#).is_err());
    }
}
