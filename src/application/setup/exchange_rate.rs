use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::ledger::{LedgerError, LedgerService};

#[derive(Debug, Deserialize)]
pub struct ExchangeRateCommand {
  pub from_currency: String,
  pub to_currency: String,
  pub transaction_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ExchangeRateResponse {
  pub rate: Decimal,
}

pub struct ExchangeRateUseCase {
  ledger: Arc<LedgerService>,
}

impl ExchangeRateUseCase {
  pub fn new(ledger: Arc<LedgerService>) -> Self {
    Self { ledger }
  }

  pub async fn execute(&self, command: ExchangeRateCommand) -> Result<ExchangeRateResponse, LedgerError> {
    let transaction_date = command.transaction_date.map(|d| d.to_string());
    let rate = self
      .ledger
      .exchange_rate(
        &command.from_currency,
        &command.to_currency,
        transaction_date.as_deref(),
      )
      .await?;
    Ok(ExchangeRateResponse { rate })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::backend::MemoryBackend;
  use rust_decimal_macros::dec;

  #[tokio::test]
  async fn test_rate_is_taken_from_the_exchange_source() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    backend.set_exchange_rate(dec!(0.709));

    let ledger = Arc::new(LedgerService::new(
      backend.clone(),
      backend.clone(),
      backend.clone(),
      backend.clone(),
    ));
    let response = ExchangeRateUseCase::new(ledger)
      .execute(ExchangeRateCommand {
        from_currency: "USD".to_string(),
        to_currency: "JOD".to_string(),
        transaction_date: None,
      })
      .await
      .unwrap();

    assert_eq!(response.rate, dec!(0.709));
  }
}
