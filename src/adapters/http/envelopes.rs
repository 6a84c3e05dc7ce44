use serde::{Serialize, Serializer};
use serde_json::{Value, json};

/// Response envelope of the write endpoints. Success is `{"error": 0,
/// "status": 1}`, failure `{"error": "<message>", "status": 0}` — always
/// with HTTP 200, the mobile client reads only the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacyEnvelope {
  pub error: Value,
  pub status: u8,
}

impl LegacyEnvelope {
  pub fn ok() -> Self {
    Self {
      error: json!(0),
      status: 1,
    }
  }

  pub fn fail(message: impl Into<String>) -> Self {
    Self {
      error: Value::String(message.into()),
      status: 0,
    }
  }
}

/// Response envelope of the reporting endpoints: the payload's fields merged
/// with `{"status": "success"}`, or `{"status": "error", "message": ...}`.
/// Also always HTTP 200. Kept separate from [`LegacyEnvelope`] on purpose;
/// the client parses the two shapes with different code paths.
#[derive(Debug)]
pub enum StatusEnvelope<T> {
  Success(T),
  Error(String),
}

impl<T: Serialize> StatusEnvelope<T> {
  pub fn to_value(&self) -> Value {
    match self {
      StatusEnvelope::Success(data) => {
        let mut object = match serde_json::to_value(data) {
          Ok(Value::Object(object)) => object,
          Ok(other) => {
            let mut object = serde_json::Map::new();
            object.insert("data".to_string(), other);
            object
          }
          Err(e) => {
            return json!({ "status": "error", "message": e.to_string() });
          }
        };
        object.insert("status".to_string(), json!("success"));
        Value::Object(object)
      }
      StatusEnvelope::Error(message) => json!({ "status": "error", "message": message }),
    }
  }
}

impl<T: Serialize> Serialize for StatusEnvelope<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.to_value().serialize(serializer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Serialize;

  #[test]
  fn test_legacy_envelope_shapes() {
    assert_eq!(
      serde_json::to_value(LegacyEnvelope::ok()).unwrap(),
      json!({"error": 0, "status": 1})
    );
    assert_eq!(
      serde_json::to_value(LegacyEnvelope::fail("Not Permitted")).unwrap(),
      json!({"error": "Not Permitted", "status": 0})
    );
  }

  #[test]
  fn test_status_envelope_merges_payload_fields() {
    #[derive(Serialize)]
    struct Created {
      customer_id: String,
    }

    let envelope = StatusEnvelope::Success(Created {
      customer_id: "CUSTOMER-00001".to_string(),
    });
    assert_eq!(
      envelope.to_value(),
      json!({"status": "success", "customer_id": "CUSTOMER-00001"})
    );
  }

  #[test]
  fn test_status_envelope_error_shape() {
    let envelope: StatusEnvelope<()> = StatusEnvelope::Error("No Territory found in the system.".to_string());
    assert_eq!(
      envelope.to_value(),
      json!({"status": "error", "message": "No Territory found in the system."})
    );
  }
}
