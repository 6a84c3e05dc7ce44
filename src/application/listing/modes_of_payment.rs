use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::domain::ledger::{LedgerError, LedgerService, ModeOfPayment};

#[derive(Debug, Deserialize)]
pub struct ModesOfPaymentCommand {
  pub company: String,
  pub filters: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ModesOfPaymentResponse {
  pub modes: Vec<ModeOfPayment>,
}

pub struct ModesOfPaymentUseCase {
  ledger: Arc<LedgerService>,
}

impl ModesOfPaymentUseCase {
  pub fn new(ledger: Arc<LedgerService>) -> Self {
    Self { ledger }
  }

  pub async fn execute(&self, command: ModesOfPaymentCommand) -> Result<ModesOfPaymentResponse, LedgerError> {
    let modes = self
      .ledger
      .modes_of_payment(&command.company, command.filters.as_ref())
      .await?;
    Ok(ModesOfPaymentResponse { modes })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::docs::Document;
  use crate::infrastructure::backend::MemoryBackend;
  use serde_json::json;

  #[tokio::test]
  async fn test_default_account_is_joined_per_company() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());

    let mut cash = Document::new("Mode of Payment");
    cash.set_name("Cash");
    let mut account = Document::new("Mode of Payment Account");
    account.set("company", json!("Acme"));
    account.set("default_account", json!("Cash - A"));
    cash.append_child("accounts", account);
    backend.seed(cash);

    let mut card = Document::new("Mode of Payment");
    card.set_name("Card");
    backend.seed(card);

    let ledger = Arc::new(LedgerService::new(
      backend.clone(),
      backend.clone(),
      backend.clone(),
      backend.clone(),
    ));
    let response = ModesOfPaymentUseCase::new(ledger)
      .execute(ModesOfPaymentCommand {
        company: "Acme".to_string(),
        filters: None,
      })
      .await
      .unwrap();

    assert_eq!(response.modes.len(), 2);
    assert_eq!(response.modes[0].name, "Cash");
    assert_eq!(response.modes[0].account, Some(json!("Cash - A")));
    assert_eq!(response.modes[1].account, None);
  }
}
