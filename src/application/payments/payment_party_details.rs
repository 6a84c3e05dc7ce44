use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::ledger::{LedgerError, LedgerService};

#[derive(Debug, Deserialize)]
pub struct PaymentPartyDetailsCommand {
  pub company: Option<String>,
  pub party_type: String,
  pub party: String,
  pub date: NaiveDate,
  pub cost_center: Option<String>,
}

/// Party defaults for a new payment entry, returned as the accounting
/// engine shaped them.
pub struct PaymentPartyDetailsUseCase {
  ledger: Arc<LedgerService>,
}

impl PaymentPartyDetailsUseCase {
  pub fn new(ledger: Arc<LedgerService>) -> Self {
    Self { ledger }
  }

  pub async fn execute(&self, command: PaymentPartyDetailsCommand) -> Result<Value, LedgerError> {
    self
      .ledger
      .payment_party_details(
        command.company.as_deref(),
        &command.party_type,
        &command.party,
        &command.date.to_string(),
        command.cost_center.as_deref(),
      )
      .await
  }
}
