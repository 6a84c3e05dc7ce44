use serde::Serialize;
use std::sync::Arc;

use crate::domain::docs::ErrorLog;
use crate::domain::ledger::{LedgerError, LedgerService};

#[derive(Debug, Serialize)]
pub struct DefaultCountryResponse {
  pub default_country: Option<String>,
}

pub struct DefaultCountryUseCase {
  ledger: Arc<LedgerService>,
  error_log: Arc<dyn ErrorLog>,
}

impl DefaultCountryUseCase {
  pub fn new(ledger: Arc<LedgerService>, error_log: Arc<dyn ErrorLog>) -> Self {
    Self { ledger, error_log }
  }

  pub async fn execute(&self) -> Result<DefaultCountryResponse, LedgerError> {
    match self.ledger.default_country().await {
      Ok(country) => Ok(DefaultCountryResponse { default_country: country }),
      Err(e) => {
        self
          .error_log
          .record("Get Default Country Error", &e.to_string())
          .await;
        Err(e)
      }
    }
  }
}
