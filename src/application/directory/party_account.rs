use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::ledger::{LedgerError, LedgerService};

#[derive(Debug, Deserialize)]
pub struct PartyAccountCommand {
  pub party_type: String,
  pub party: String,
  pub company: String,
}

pub struct PartyAccountUseCase {
  ledger: Arc<LedgerService>,
}

impl PartyAccountUseCase {
  pub fn new(ledger: Arc<LedgerService>) -> Self {
    Self { ledger }
  }

  pub async fn execute(&self, command: PartyAccountCommand) -> Result<Value, LedgerError> {
    self
      .ledger
      .party_account(&command.party_type, &command.party, &command.company)
      .await
  }
}
