//! Request deserialization helpers.

/// Deserializes an optional "raw scalar" field.
///
/// Form-driven clients send numeric fields as strings while JSON clients
/// send numbers; the domain validators want the literal text either way.
/// `null` counts as absent, matching the partial-update contract.
pub mod raw_scalar {
    use serde::{Deserialize, Deserializer, de::Error};
    use serde_json::Value;

    /// Accepts a JSON string, number, or null and yields the literal text.
    ///
    /// # Errors
    ///
    /// Rejects arrays, objects, and booleans.
    pub fn option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(D::Error::custom(format!(
                "expected a string or number, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "super::raw_scalar::option")]
        value: Option<String>,
    }

    fn parse(json: &str) -> Payload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_string_passes_through() {
        assert_eq!(parse(r#"{"value": "1200"}"#).value.as_deref(), Some("1200"));
    }

    #[test]
    fn test_number_becomes_literal_text() {
        assert_eq!(parse(r#"{"value": 1200}"#).value.as_deref(), Some("1200"));
        assert_eq!(
            parse(r#"{"value": 1200.5}"#).value.as_deref(),
            Some("1200.5")
        );
    }

    #[test]
    fn test_null_and_absent_are_none() {
        assert_eq!(parse(r#"{"value": null}"#).value, None);
        assert_eq!(parse("{}").value, None);
    }

    #[test]
    fn test_array_is_rejected() {
        assert!(serde_json::from_str::<Payload>(r#"{"value": [1]}"#).is_err());
    }
}
