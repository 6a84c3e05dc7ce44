use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::domain::docs::{DocError, DocumentService};

#[derive(Debug, Deserialize)]
pub struct GetPaymentEntryCommand {
  pub payment_entry: String,
}

/// Full-fieldset rows for the named entry; empty when it does not exist.
#[derive(Debug, Serialize)]
pub struct GetPaymentEntryResponse {
  pub entries: Vec<Map<String, Value>>,
}

pub struct GetPaymentEntryUseCase {
  documents: Arc<DocumentService>,
}

impl GetPaymentEntryUseCase {
  pub fn new(documents: Arc<DocumentService>) -> Self {
    Self { documents }
  }

  pub async fn execute(&self, command: GetPaymentEntryCommand) -> Result<GetPaymentEntryResponse, DocError> {
    let entries = self
      .documents
      .fetch_rows("Payment Entry", &command.payment_entry)
      .await?;
    Ok(GetPaymentEntryResponse { entries })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::docs::Document;
  use crate::infrastructure::backend::MemoryBackend;
  use serde_json::json;

  #[tokio::test]
  async fn test_absent_entry_yields_empty_list() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    let use_case =
      GetPaymentEntryUseCase::new(Arc::new(DocumentService::new(backend.clone(), backend.clone())));

    let response = use_case
      .execute(GetPaymentEntryCommand {
        payment_entry: "PE-00404".to_string(),
      })
      .await
      .unwrap();
    assert!(response.entries.is_empty());
  }

  #[tokio::test]
  async fn test_existing_entry_comes_back_with_all_fields() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    let mut entry = Document::new("Payment Entry");
    entry.set("paid_amount", json!(75));
    entry.set("party", json!("CUSTOMER-00001"));
    let name = backend.seed(entry);

    let use_case =
      GetPaymentEntryUseCase::new(Arc::new(DocumentService::new(backend.clone(), backend.clone())));
    let response = use_case
      .execute(GetPaymentEntryCommand { payment_entry: name })
      .await
      .unwrap();

    assert_eq!(response.entries.len(), 1);
    assert_eq!(response.entries[0].get("paid_amount"), Some(&json!(75)));
    assert_eq!(response.entries[0].get("party"), Some(&json!("CUSTOMER-00001")));
  }
}
