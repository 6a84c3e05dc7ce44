use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::domain::docs::{DocError, DocumentService, PayloadArgs};

use super::InvoiceKind;

#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceCommand {
  pub args: Value,
}

#[derive(Debug, Serialize)]
pub struct UpdateInvoiceResponse {
  pub name: String,
}

pub struct UpdateInvoiceUseCase {
  documents: Arc<DocumentService>,
  kind: InvoiceKind,
}

impl UpdateInvoiceUseCase {
  pub fn new(documents: Arc<DocumentService>, kind: InvoiceKind) -> Self {
    Self { documents, kind }
  }

  pub async fn execute(&self, command: UpdateInvoiceCommand) -> Result<UpdateInvoiceResponse, DocError> {
    let args = PayloadArgs::parse(command.args)?;
    let doc = self
      .documents
      .stage_update(self.kind.doctype(), self.kind.key_field(), &args)
      .await?;
    let doc = self.documents.commit_update(doc).await?;
    Ok(UpdateInvoiceResponse {
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

  #[tokio::test]
  async fn test_update_is_keyed_by_the_kinds_payload_field() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    let mut invoice = Document::new("Sales Invoice");
    invoice.set("customer", json!("CUSTOMER-00001"));
    let name = backend.seed(invoice);

    let use_case = UpdateInvoiceUseCase::new(
      Arc::new(DocumentService::new(backend.clone(), backend.clone())),
      InvoiceKind::Sales,
    );
    use_case
      .execute(UpdateInvoiceCommand {
        args: json!({ "sales_invoice": name, "due_date": "2024-07-01" }),
      })
      .await
      .unwrap();

    let stored = backend.stored("Sales Invoice", &name).unwrap();
    assert_eq!(stored.get("due_date"), Some(&json!("2024-07-01")));
    assert_eq!(stored.get("customer"), Some(&json!("CUSTOMER-00001")));
  }

  #[tokio::test]
  async fn test_missing_key_names_the_doctype() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    let use_case = UpdateInvoiceUseCase::new(
      Arc::new(DocumentService::new(backend.clone(), backend.clone())),
      InvoiceKind::Purchase,
    );

    let err = use_case
      .execute(UpdateInvoiceCommand { args: json!({}) })
      .await
      .unwrap_err();
    assert_eq!(err.to_string(), "No Purchase Invoice is Specified");
  }
}
