use serde::Serialize;
use std::sync::Arc;

use crate::domain::docs::ErrorLog;
use crate::domain::ledger::{LedgerError, LedgerService, TaxTemplate};

#[derive(Debug, Serialize)]
pub struct TaxTemplatesResponse {
  pub templates: Vec<TaxTemplate>,
}

pub struct TaxTemplatesUseCase {
  ledger: Arc<LedgerService>,
  error_log: Arc<dyn ErrorLog>,
}

impl TaxTemplatesUseCase {
  pub fn new(ledger: Arc<LedgerService>, error_log: Arc<dyn ErrorLog>) -> Self {
    Self { ledger, error_log }
  }

  pub async fn execute(&self) -> Result<TaxTemplatesResponse, LedgerError> {
    match self.ledger.tax_templates().await {
      Ok(templates) => Ok(TaxTemplatesResponse { templates }),
      Err(e) => {
        self.error_log.record("Get Tax Templates Error", &e.to_string()).await;
        Err(e)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::docs::Document;
  use crate::infrastructure::backend::MemoryBackend;
  use rust_decimal_macros::dec;
  use serde_json::json;

  #[tokio::test]
  async fn test_templates_carry_their_charge_rows() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    let mut template = Document::new("Sales Taxes and Charges Template");
    template.set_name("VAT 16%");
    template.set("title", json!("VAT 16%"));
    let mut charge = Document::new("Sales Taxes and Charges");
    charge.set("charge_type", json!("On Net Total"));
    charge.set("account_head", json!("VAT - A"));
    charge.set("rate", json!(16.0));
    template.append_child("taxes", charge);
    backend.seed(template);

    let ledger = Arc::new(LedgerService::new(
      backend.clone(),
      backend.clone(),
      backend.clone(),
      backend.clone(),
    ));
    let response = TaxTemplatesUseCase::new(ledger, backend.clone())
      .execute()
      .await
      .unwrap();

    assert_eq!(response.templates.len(), 1);
    assert_eq!(response.templates[0].name, "VAT 16%");
    assert_eq!(response.templates[0].taxes.len(), 1);
    assert_eq!(response.templates[0].taxes[0].rate, Some(dec!(16.0)));
  }
}
