use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::domain::docs::{DocError, DocumentService};

use super::InvoiceKind;

#[derive(Debug)]
pub struct GetInvoiceCommand {
  pub name: String,
}

#[derive(Debug, Serialize)]
pub struct GetInvoiceResponse {
  pub invoices: Vec<Map<String, Value>>,
}

pub struct GetInvoiceUseCase {
  documents: Arc<DocumentService>,
  kind: InvoiceKind,
}

impl GetInvoiceUseCase {
  pub fn new(documents: Arc<DocumentService>, kind: InvoiceKind) -> Self {
    Self { documents, kind }
  }

  pub async fn execute(&self, command: GetInvoiceCommand) -> Result<GetInvoiceResponse, DocError> {
    let invoices = self.documents.fetch_rows(self.kind.doctype(), &command.name).await?;
    Ok(GetInvoiceResponse { invoices })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::invoicing::{CreateInvoiceCommand, CreateInvoiceUseCase};
  use crate::infrastructure::backend::MemoryBackend;
  use serde_json::json;

  #[tokio::test]
  async fn test_created_invoice_is_readable_back() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    let documents = Arc::new(DocumentService::new(backend.clone(), backend.clone()));

    let created = CreateInvoiceUseCase::new(documents.clone(), InvoiceKind::Sales)
      .execute(CreateInvoiceCommand {
        args: json!({ "customer": "CUSTOMER-00001", "currency": "EUR" }),
      })
      .await
      .unwrap();

    let response = GetInvoiceUseCase::new(documents, InvoiceKind::Sales)
      .execute(GetInvoiceCommand { name: created.name })
      .await
      .unwrap();

    assert_eq!(response.invoices.len(), 1);
    assert_eq!(response.invoices[0].get("currency"), Some(&json!("EUR")));
  }
}
