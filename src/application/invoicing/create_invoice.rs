use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::domain::docs::{DocError, DocumentService, PayloadArgs};

use super::InvoiceKind;

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceCommand {
  pub args: Value,
}

#[derive(Debug, Serialize)]
pub struct CreateInvoiceResponse {
  pub name: String,
}

pub struct CreateInvoiceUseCase {
  documents: Arc<DocumentService>,
  kind: InvoiceKind,
}

impl CreateInvoiceUseCase {
  pub fn new(documents: Arc<DocumentService>, kind: InvoiceKind) -> Self {
    Self { documents, kind }
  }

  pub async fn execute(&self, command: CreateInvoiceCommand) -> Result<CreateInvoiceResponse, DocError> {
    let args = PayloadArgs::parse(command.args)?;
    let doc = self.documents.stage_new(self.kind.doctype(), &args).await?;
    let doc = self.documents.commit_new(doc).await?;
    Ok(CreateInvoiceResponse {
      name: doc.name().unwrap_or_default().to_string(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::backend::MemoryBackend;
  use serde_json::json;

  #[tokio::test]
  async fn test_sales_invoice_with_item_rows() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    let use_case = CreateInvoiceUseCase::new(
      Arc::new(DocumentService::new(backend.clone(), backend.clone())),
      InvoiceKind::Sales,
    );

    let response = use_case
      .execute(CreateInvoiceCommand {
        args: json!({
          "customer": "CUSTOMER-00001",
          "items": [{"item_code": "WIDGET", "qty": 3, "rate": 10.0}]
        }),
      })
      .await
      .unwrap();

    let stored = backend.stored("Sales Invoice", &response.name).unwrap();
    assert_eq!(stored.get("customer"), Some(&json!("CUSTOMER-00001")));
    assert_eq!(stored.children("items").len(), 1);
    assert_eq!(stored.children("items")[0].get("qty"), Some(&json!(3)));
  }

  #[tokio::test]
  async fn test_purchase_invoice_uses_its_own_doctype() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    let use_case = CreateInvoiceUseCase::new(
      Arc::new(DocumentService::new(backend.clone(), backend.clone())),
      InvoiceKind::Purchase,
    );

    use_case
      .execute(CreateInvoiceCommand {
        args: json!({ "supplier": "SUPPLIER-00001" }),
      })
      .await
      .unwrap();

    assert_eq!(backend.count("Purchase Invoice"), 1);
    assert_eq!(backend.count("Sales Invoice"), 0);
  }
}
