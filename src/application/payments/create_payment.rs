use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::domain::docs::{DocError, DocumentService, PayloadArgs};

#[derive(Debug, Deserialize)]
pub struct CreatePaymentCommand {
  /// Raw `args` payload: a JSON object or a JSON-encoded string of one.
  pub args: Value,
}

#[derive(Debug, Serialize)]
pub struct CreatePaymentResponse {
  pub name: String,
}

pub struct CreatePaymentUseCase {
  documents: Arc<DocumentService>,
}

impl CreatePaymentUseCase {
  pub fn new(documents: Arc<DocumentService>) -> Self {
    Self { documents }
  }

  pub async fn execute(&self, command: CreatePaymentCommand) -> Result<CreatePaymentResponse, DocError> {
    let args = PayloadArgs::parse(command.args)?;
    let mut doc = self.documents.stage_new("Payment Entry", &args).await?;

    // The mobile client only fills received_amount for cross-currency
    // payments; everyone else pays what they receive.
    if !doc.is_set("received_amount") {
      if let Some(paid_amount) = doc.get("paid_amount").cloned() {
        doc.set("received_amount", paid_amount);
      }
    }

    let doc = self.documents.commit_new(doc).await?;
    Ok(CreatePaymentResponse {
      name: doc.name().unwrap_or_default().to_string(),
    })
  }
}
