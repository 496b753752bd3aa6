use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts an identifier sent as a string or a number. Empty strings and
/// `null` become `None`.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<Value> = Option::deserialize(deserializer)?;
    match opt {
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Null) | None => Ok(None),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number identifier, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        id: Option<String>,
    }

    #[test]
    fn test_string_and_number_ids() {
        let w: Wrapper = serde_json::from_str(r#"{"id":"c1"}"#).unwrap();
        assert_eq!(w.id.as_deref(), Some("c1"));

        let w: Wrapper = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(w.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_missing_empty_and_null_ids() {
        let w: Wrapper = serde_json::from_str(r#"{}"#).unwrap();
        assert!(w.id.is_none());

        let w: Wrapper = serde_json::from_str(r#"{"id":""}"#).unwrap();
        assert!(w.id.is_none());

        let w: Wrapper = serde_json::from_str(r#"{"id":null}"#).unwrap();
        assert!(w.id.is_none());
    }

    #[test]
    fn test_object_id_is_rejected() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"id":{"oid":"x"}}"#).is_err());
    }
}
