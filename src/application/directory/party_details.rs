use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::ledger::{LedgerError, LedgerService, PartyDetailsQuery};

#[derive(Debug, Deserialize)]
pub struct PartyDetailsCommand {
  pub party_type: String,
  pub party: String,
  pub posting_date: Option<String>,
  pub company: Option<String>,
  pub account: Option<String>,
  pub price_list: Option<String>,
  pub pos_profile: Option<String>,
  pub doctype: Option<String>,
}

pub struct PartyDetailsUseCase {
  ledger: Arc<LedgerService>,
}

impl PartyDetailsUseCase {
  pub fn new(ledger: Arc<LedgerService>) -> Self {
    Self { ledger }
  }

  pub async fn execute(&self, command: PartyDetailsCommand) -> Result<Value, LedgerError> {
    self
      .ledger
      .party_details(PartyDetailsQuery {
        party_type: command.party_type,
        party: command.party,
        posting_date: command.posting_date,
        company: command.company,
        account: command.account,
        price_list: command.price_list,
        pos_profile: command.pos_profile,
        doctype: command.doctype,
      })
      .await
  }
}
