use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PayloadError {
  #[error("args payload is not valid JSON")]
  Malformed,

  #[error("args payload must be an object")]
  NotAnObject,
}

/// The named `args` parameter of the write endpoints.
///
/// Mobile clients send it either as a JSON object or as a JSON-encoded
/// string; both decode to the same key/value view.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadArgs(Map<String, Value>);

impl PayloadArgs {
  pub fn parse(raw: Value) -> Result<Self, PayloadError> {
    let value = match raw {
      Value::String(encoded) => {
        serde_json::from_str(&encoded).map_err(|_| PayloadError::Malformed)?
      }
      other => other,
    };

    match value {
      Value::Object(map) => Ok(Self(map)),
      _ => Err(PayloadError::NotAnObject),
    }
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  pub fn str(&self, key: &str) -> Option<&str> {
    self.0.get(key).and_then(Value::as_str)
  }

  /// String value of `key`, with an empty string counting as absent (the
  /// protocol treats "" the same as a missing argument).
  pub fn non_empty_str(&self, key: &str) -> Option<&str> {
    self.str(key).filter(|s| !s.is_empty())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
    self.0.iter()
  }
}

/// Access level requested from the external permission checker. Only
/// writes are gated; reads pass through unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
  Write,
}

impl AccessLevel {
  pub fn as_str(&self) -> &'static str {
    match self {
      AccessLevel::Write => "write",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_parse_accepts_object() {
    let args = PayloadArgs::parse(json!({"paid_amount": 100})).unwrap();
    assert_eq!(args.get("paid_amount"), Some(&json!(100)));
  }

  #[test]
  fn test_parse_accepts_encoded_string() {
    let args = PayloadArgs::parse(json!("{\"owner\": \"user@example.com\"}")).unwrap();
    assert_eq!(args.str("owner"), Some("user@example.com"));
  }

  #[test]
  fn test_parse_rejects_garbage() {
    assert_eq!(
      PayloadArgs::parse(json!("not json at all")),
      Err(PayloadError::Malformed)
    );
    assert_eq!(PayloadArgs::parse(json!([1, 2])), Err(PayloadError::NotAnObject));
  }

  #[test]
  fn test_non_empty_str() {
    let args = PayloadArgs::parse(json!({"payment_entry": "", "owner": "u"})).unwrap();
    assert_eq!(args.non_empty_str("payment_entry"), None);
    assert_eq!(args.non_empty_str("owner"), Some("u"));
    assert_eq!(args.non_empty_str("missing"), None);
  }

  #[test]
  fn test_access_level_labels() {
    assert_eq!(AccessLevel::Write.as_str(), "write");
  }
}
