use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::domain::docs::{DocError, DocumentService, PayloadArgs};

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentCommand {
  /// Raw `args` payload; `payment_entry` names the record to update.
  pub args: Value,
}

#[derive(Debug, Serialize)]
pub struct UpdatePaymentResponse {
  pub name: String,
}

pub struct UpdatePaymentUseCase {
  documents: Arc<DocumentService>,
}

impl UpdatePaymentUseCase {
  pub fn new(documents: Arc<DocumentService>) -> Self {
    Self { documents }
  }

  pub async fn execute(&self, command: UpdatePaymentCommand) -> Result<UpdatePaymentResponse, DocError> {
    let args = PayloadArgs::parse(command.args)?;
    let doc = self
      .documents
      .stage_update("Payment Entry", "payment_entry", &args)
      .await?;
    let doc = self.documents.commit_update(doc).await?;
    Ok(UpdatePaymentResponse {
      name: doc.name().unwrap_or_default().to_string(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::docs::Document;
  use crate::infrastructure::backend::MemoryBackend;
  use serde_json::json;

  fn use_case(backend: &Arc<MemoryBackend>) -> UpdatePaymentUseCase {
    UpdatePaymentUseCase::new(Arc::new(DocumentService::new(backend.clone(), backend.clone())))
  }

  #[tokio::test]
  async fn test_missing_key_is_reported() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());

    let err = use_case(&backend)
      .execute(UpdatePaymentCommand {
        args: json!({ "payment_entry": "", "paid_amount": 10 }),
      })
      .await
      .unwrap_err();

    assert_eq!(err.to_string(), "No Payment Entry is Specified");
  }

  #[tokio::test]
  async fn test_unknown_record_is_reported_by_name() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());

    let err = use_case(&backend)
      .execute(UpdatePaymentCommand {
        args: json!({ "payment_entry": "PE-99999" }),
      })
      .await
      .unwrap_err();

    assert_eq!(err.to_string(), "No Payment Entry with the Name PE-99999");
  }

  #[tokio::test]
  async fn test_update_applies_declared_fields_only() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    let mut existing = Document::new("Payment Entry");
    existing.set("paid_amount", json!(100));
    existing.set("reference_no", json!("REF-1"));
    let name = backend.seed(existing);

    use_case(&backend)
      .execute(UpdatePaymentCommand {
        args: json!({
          "payment_entry": name,
          "paid_amount": 250,
          "docstatus": 2,
        }),
      })
      .await
      .unwrap();

    let stored = backend.stored("Payment Entry", &name).unwrap();
    assert_eq!(stored.get("paid_amount"), Some(&json!(250)));
    assert_eq!(stored.get("reference_no"), Some(&json!("REF-1")));
    assert_eq!(stored.get("docstatus"), None);
    assert_eq!(backend.commits(), 1);
  }

  #[tokio::test]
  async fn test_update_replaces_sub_table_rows() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    let mut existing = Document::new("Payment Entry");
    existing.set("paid_amount", json!(100));
    let mut old_row = Document::new("Payment Entry Reference");
    old_row.set("reference_name", json!("SINV-0001"));
    old_row.set("allocated_amount", json!(100));
    existing.append_child("references", old_row);
    let name = backend.seed(existing);

    use_case(&backend)
      .execute(UpdatePaymentCommand {
        args: json!({
          "payment_entry": name,
          "references": [
            { "reference_name": "SINV-0002", "allocated_amount": 40 },
          ],
        }),
      })
      .await
      .unwrap();

    let stored = backend.stored("Payment Entry", &name).unwrap();
    let references = stored.children("references");
    assert_eq!(references.len(), 1);
    assert_eq!(references[0].get("reference_name"), Some(&json!("SINV-0002")));
  }
}
