use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::domain::ledger::{LedgerError, LedgerService, PaymentDirection};

#[derive(Debug, Deserialize)]
pub struct AccountOptionsCommand {
  pub payment_type: String,
  pub party_type: String,
  pub company: Option<String>,
}

/// Account names as single-element rows, mirroring the link-query result
/// shape the client's picker widget parses.
#[derive(Debug, Serialize)]
pub struct AccountOptionsResponse {
  pub accounts: Vec<Vec<Value>>,
}

/// Shared by the paid-to and paid-from endpoints; the direction is fixed
/// per route at wiring time.
pub struct AccountOptionsUseCase {
  ledger: Arc<LedgerService>,
  direction: PaymentDirection,
}

impl AccountOptionsUseCase {
  pub fn new(ledger: Arc<LedgerService>, direction: PaymentDirection) -> Self {
    Self { ledger, direction }
  }

  pub async fn execute(&self, command: AccountOptionsCommand) -> Result<AccountOptionsResponse, LedgerError> {
    let accounts = self
      .ledger
      .account_options(
        self.direction,
        &command.payment_type,
        &command.party_type,
        command.company,
      )
      .await?;
    Ok(AccountOptionsResponse { accounts })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::docs::Document;
  use crate::infrastructure::backend::MemoryBackend;
  use serde_json::json;

  fn seed_account(backend: &MemoryBackend, name: &str, account_type: &str) {
    let mut account = Document::new("Account");
    account.set_name(name);
    account.set("company", json!("Acme"));
    account.set("is_group", json!(0));
    account.set("account_type", json!(account_type));
    backend.seed(account);
  }

  #[tokio::test]
  async fn test_receive_side_lists_bank_and_cash_accounts() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    seed_account(&backend, "Cash - A", "Cash");
    seed_account(&backend, "Bank - A", "Bank");
    seed_account(&backend, "Debtors - A", "Receivable");

    let ledger = Arc::new(LedgerService::new(
      backend.clone(),
      backend.clone(),
      backend.clone(),
      backend.clone(),
    ));
    let use_case = AccountOptionsUseCase::new(ledger, PaymentDirection::PaidTo);

    let response = use_case
      .execute(AccountOptionsCommand {
        payment_type: "Receive".to_string(),
        party_type: "Customer".to_string(),
        company: Some("Acme".to_string()),
      })
      .await
      .unwrap();

    assert_eq!(
      response.accounts,
      vec![vec![json!("Cash - A")], vec![json!("Bank - A")]]
    );
  }

  #[tokio::test]
  async fn test_party_side_lists_receivable_accounts_for_customers() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    seed_account(&backend, "Cash - A", "Cash");
    seed_account(&backend, "Debtors - A", "Receivable");

    let ledger = Arc::new(LedgerService::new(
      backend.clone(),
      backend.clone(),
      backend.clone(),
      backend.clone(),
    ));
    let use_case = AccountOptionsUseCase::new(ledger, PaymentDirection::PaidFrom);

    let response = use_case
      .execute(AccountOptionsCommand {
        payment_type: "Receive".to_string(),
        party_type: "Customer".to_string(),
        company: Some("Acme".to_string()),
      })
      .await
      .unwrap();

    assert_eq!(response.accounts, vec![vec![json!("Debtors - A")]]);
  }
}
