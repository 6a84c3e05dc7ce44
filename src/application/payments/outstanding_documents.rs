use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::ledger::{LedgerError, LedgerService};

#[derive(Debug, Deserialize)]
pub struct OutstandingDocumentsCommand {
  /// Forwarded to the accounting engine verbatim; it decodes string
  /// payloads itself.
  pub args: Value,
}

pub struct OutstandingDocumentsUseCase {
  ledger: Arc<LedgerService>,
}

impl OutstandingDocumentsUseCase {
  pub fn new(ledger: Arc<LedgerService>) -> Self {
    Self { ledger }
  }

  pub async fn execute(&self, command: OutstandingDocumentsCommand) -> Result<Value, LedgerError> {
    self.ledger.outstanding_documents(command.args).await
  }
}
