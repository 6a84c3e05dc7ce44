use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;

use super::errors::LedgerError;

/// Currency exchange rate lookup, delegated to the accounting engine.
#[async_trait]
pub trait ExchangeRates: Send + Sync {
  async fn rate(
    &self,
    from_currency: &str,
    to_currency: &str,
    transaction_date: Option<&str>,
  ) -> Result<Decimal, LedgerError>;
}

/// Arguments of the general party-details lookup. Everything optional is
/// forwarded as-is; the engine applies its own defaulting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartyDetailsQuery {
  pub party_type: String,
  pub party: String,
  pub posting_date: Option<String>,
  pub company: Option<String>,
  pub account: Option<String>,
  pub price_list: Option<String>,
  pub pos_profile: Option<String>,
  pub doctype: Option<String>,
}

/// Party resolution (accounts, balances, defaults), delegated verbatim to
/// the accounting engine. Results are opaque JSON shaped by the engine.
#[async_trait]
pub trait PartyResolver: Send + Sync {
  async fn payment_party_details(
    &self,
    company: Option<&str>,
    party_type: &str,
    party: &str,
    date: &str,
    cost_center: Option<&str>,
  ) -> Result<Value, LedgerError>;

  async fn party_details(&self, query: PartyDetailsQuery) -> Result<Value, LedgerError>;

  async fn party_account(&self, party_type: &str, party: &str, company: &str) -> Result<Value, LedgerError>;
}

/// Outstanding reference documents for a payment, delegated verbatim.
#[async_trait]
pub trait OutstandingDocuments: Send + Sync {
  async fn outstanding_for(&self, args: Value) -> Result<Value, LedgerError>;
}
