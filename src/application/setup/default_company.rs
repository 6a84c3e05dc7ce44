use serde::Serialize;
use std::sync::Arc;

use crate::domain::ledger::{LedgerError, LedgerService};

#[derive(Debug, Serialize)]
pub struct DefaultCompanyResponse {
  pub company: Option<String>,
}

pub struct DefaultCompanyUseCase {
  ledger: Arc<LedgerService>,
}

impl DefaultCompanyUseCase {
  pub fn new(ledger: Arc<LedgerService>) -> Self {
    Self { ledger }
  }

  pub async fn execute(&self) -> Result<DefaultCompanyResponse, LedgerError> {
    let company = self.ledger.default_company().await?;
    Ok(DefaultCompanyResponse { company })
  }
}
