use thiserror::Error;

use super::value_objects::PayloadError;

/// Failures reported by the external document service.
#[derive(Debug, Error)]
pub enum DocStoreError {
  #[error("{doctype} {name} not found")]
  NotFound { doctype: String, name: String },

  #[error("Unknown DocType: {0}")]
  UnknownDoctype(String),

  /// The service refused the operation (validation, mandatory fields,
  /// engine-side permission rules). Carries the service's message verbatim.
  #[error("{0}")]
  Rejected(String),

  #[error("document service unavailable: {0}")]
  Unavailable(String),

  #[error("unexpected document service response: {0}")]
  Malformed(String),
}

/// Domain failures of the write/read handler pattern. Every variant maps to
/// a message inside the endpoint's envelope, never to a raised error.
#[derive(Debug, Error)]
pub enum DocError {
  #[error("Not Permitted")]
  NotPermitted,

  #[error("No {0} is Specified")]
  MissingName(String),

  #[error("No {doctype} with the Name {name}")]
  UnknownRecord { doctype: String, name: String },

  #[error(transparent)]
  Payload(#[from] PayloadError),

  #[error(transparent)]
  Store(#[from] DocStoreError),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_envelope_messages_match_protocol() {
    assert_eq!(DocError::NotPermitted.to_string(), "Not Permitted");
    assert_eq!(
      DocError::MissingName("Payment Entry".to_string()).to_string(),
      "No Payment Entry is Specified"
    );
    assert_eq!(
      DocError::UnknownRecord {
        doctype: "Sales Invoice".to_string(),
        name: "SINV-0009".to_string(),
      }
      .to_string(),
      "No Sales Invoice with the Name SINV-0009"
    );
  }
}
