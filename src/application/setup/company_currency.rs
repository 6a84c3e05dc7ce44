use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::ledger::{LedgerError, LedgerService};

/// Default company and its currency; both null when no default company is
/// configured.
#[derive(Debug, Serialize)]
pub struct CompanyCurrencyResponse {
  pub company: Option<String>,
  pub currency: Option<Value>,
}

pub struct CompanyCurrencyUseCase {
  ledger: Arc<LedgerService>,
}

impl CompanyCurrencyUseCase {
  pub fn new(ledger: Arc<LedgerService>) -> Self {
    Self { ledger }
  }

  pub async fn execute(&self) -> Result<CompanyCurrencyResponse, LedgerError> {
    match self.ledger.company_currency().await? {
      Some((company, currency)) => Ok(CompanyCurrencyResponse {
        company: Some(company),
        currency: Some(currency),
      }),
      None => Ok(CompanyCurrencyResponse {
        company: None,
        currency: None,
      }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::docs::Document;
  use crate::infrastructure::backend::MemoryBackend;
  use serde_json::json;

  #[tokio::test]
  async fn test_currency_follows_the_default_company() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    backend.set_single("Global Defaults", "default_company", json!("Acme"));
    let mut company = Document::new("Company");
    company.set_name("Acme");
    company.set("default_currency", json!("JOD"));
    backend.seed(company);

    let ledger = Arc::new(LedgerService::new(
      backend.clone(),
      backend.clone(),
      backend.clone(),
      backend.clone(),
    ));
    let response = CompanyCurrencyUseCase::new(ledger).execute().await.unwrap();

    assert_eq!(response.company, Some("Acme".to_string()));
    assert_eq!(response.currency, Some(json!("JOD")));
  }

  #[tokio::test]
  async fn test_no_default_company_yields_nulls() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    let ledger = Arc::new(LedgerService::new(
      backend.clone(),
      backend.clone(),
      backend.clone(),
      backend.clone(),
    ));

    let response = CompanyCurrencyUseCase::new(ledger).execute().await.unwrap();
    assert_eq!(response.company, None);
    assert_eq!(response.currency, None);
  }
}
