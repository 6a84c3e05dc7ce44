use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::catalog::CatalogError;
use crate::domain::directory::DirectoryError;
use crate::domain::docs::{DocError, DocStoreError};
use crate::domain::ledger::LedgerError;

use super::dtos::ErrorResponse;

/// API error type for the endpoints that surface failures as HTTP errors
/// (the enveloped endpoints never go through this; they always answer 200).
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Bad request payload or a request the backend rejected (400)
  Validation(String),

  /// The acting user lacks permission on the doctype (403)
  Forbidden,

  /// Record or doctype does not exist (404)
  NotFound(String),

  /// The document service is unreachable or failing (502)
  Upstream(String),

  /// Internal server error (500)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Forbidden => write!(f, "Not Permitted"),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Upstream(msg) => write!(f, "Upstream error: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Forbidden => StatusCode::FORBIDDEN,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Forbidden => ("not_permitted", "Not Permitted".to_string()),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Upstream(msg) => {
        tracing::error!("Upstream error: {}", msg);
        ("upstream_error", "The document service is unavailable".to_string())
      }
      ApiError::Internal(msg) => {
        // Don't expose internal error details to clients
        tracing::error!("Internal error: {}", msg);
        ("internal_error", "An internal server error occurred".to_string())
      }
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(ErrorResponse {
        error: error_type.to_string(),
        message,
      })
  }
}

impl From<DocStoreError> for ApiError {
  fn from(error: DocStoreError) -> Self {
    match error {
      DocStoreError::NotFound { .. } | DocStoreError::UnknownDoctype(_) => {
        ApiError::NotFound(error.to_string())
      }
      DocStoreError::Rejected(msg) => ApiError::Validation(msg),
      DocStoreError::Unavailable(msg) => ApiError::Upstream(msg),
      DocStoreError::Malformed(msg) => ApiError::Internal(msg),
    }
  }
}

impl From<DocError> for ApiError {
  fn from(error: DocError) -> Self {
    match error {
      DocError::NotPermitted => ApiError::Forbidden,
      DocError::MissingName(_) | DocError::UnknownRecord { .. } => ApiError::Validation(error.to_string()),
      DocError::Payload(e) => ApiError::Validation(e.to_string()),
      DocError::Store(e) => e.into(),
    }
  }
}

impl From<LedgerError> for ApiError {
  fn from(error: LedgerError) -> Self {
    match error {
      LedgerError::Store(e) => e.into(),
      LedgerError::Upstream(msg) => ApiError::Upstream(msg),
    }
  }
}

impl From<CatalogError> for ApiError {
  fn from(error: CatalogError) -> Self {
    match error {
      CatalogError::Store(e) => e.into(),
      CatalogError::Upstream(msg) => ApiError::Upstream(msg),
    }
  }
}

impl From<DirectoryError> for ApiError {
  fn from(error: DirectoryError) -> Self {
    match error {
      DirectoryError::NoCustomerGroup | DirectoryError::NoTerritory => {
        ApiError::Validation(error.to_string())
      }
      DirectoryError::Store(e) => e.into(),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(
      ApiError::NotFound("User x".to_string()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::Upstream("connection refused".to_string()).status_code(),
      StatusCode::BAD_GATEWAY
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_doc_error_conversion() {
    let api_error: ApiError = DocError::NotPermitted.into();
    assert_eq!(api_error.status_code(), StatusCode::FORBIDDEN);

    let api_error: ApiError = DocError::Store(DocStoreError::NotFound {
      doctype: "User".to_string(),
      name: "x@y.z".to_string(),
    })
    .into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError = LedgerError::Upstream("boom".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_GATEWAY);
  }
}
