use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::docs::DocumentStore;

use super::errors::LedgerError;
use super::ports::{ExchangeRates, OutstandingDocuments, PartyDetailsQuery, PartyResolver};

/// Which side of a payment entry an account list is being built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentDirection {
  PaidFrom,
  PaidTo,
}

impl PaymentDirection {
  /// Payment types for which this side points at the company's own bank or
  /// cash accounts rather than a party account.
  fn own_account_payment_types(self) -> [&'static str; 2] {
    match self {
      PaymentDirection::PaidTo => ["Receive", "Internal Transfer"],
      PaymentDirection::PaidFrom => ["Pay", "Internal Transfer"],
    }
  }

  fn account_types(self, payment_type: &str, party_type: &str) -> Vec<&'static str> {
    if self.own_account_payment_types().contains(&payment_type) {
      vec!["Bank", "Cash"]
    } else if party_type == "Customer" {
      vec!["Receivable"]
    } else {
      vec!["Payable"]
    }
  }
}

/// One mode of payment with its company-specific default account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeOfPayment {
  pub name: String,
  pub account: Option<Value>,
}

/// Tax template row shaped for the mobile client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxTemplate {
  pub name: String,
  pub title: Option<Value>,
  pub taxes: Vec<TaxCharge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxCharge {
  pub charge_type: Option<Value>,
  pub account_head: Option<Value>,
  pub description: Option<Value>,
  pub rate: Option<Decimal>,
}

/// Accounting-side reads: company defaults, account option lists, tax
/// templates, plus verbatim passthrough to the engine's business logic.
pub struct LedgerService {
  store: Arc<dyn DocumentStore>,
  exchange_rates: Arc<dyn ExchangeRates>,
  parties: Arc<dyn PartyResolver>,
  outstanding: Arc<dyn OutstandingDocuments>,
}

impl LedgerService {
  pub fn new(
    store: Arc<dyn DocumentStore>,
    exchange_rates: Arc<dyn ExchangeRates>,
    parties: Arc<dyn PartyResolver>,
    outstanding: Arc<dyn OutstandingDocuments>,
  ) -> Self {
    Self {
      store,
      exchange_rates,
      parties,
      outstanding,
    }
  }

  pub async fn default_company(&self) -> Result<Option<String>, LedgerError> {
    let value = self.store.single_value("Global Defaults", "default_company").await?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
  }

  pub async fn default_country(&self) -> Result<Option<String>, LedgerError> {
    let value = self.store.single_value("System Settings", "country").await?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
  }

  /// Default company together with its currency, or `None` when no default
  /// company is configured.
  pub async fn company_currency(&self) -> Result<Option<(String, Value)>, LedgerError> {
    let Some(company) = self.default_company().await? else {
      return Ok(None);
    };

    let currency = self
      .store
      .field_value("Company", &json!({ "name": company }), "default_currency", None)
      .await?
      .unwrap_or(Value::Null);

    Ok(Some((company, currency)))
  }

  /// Non-group account names usable on one side of a payment entry, as
  /// single-element rows (the shape the client already parses).
  pub async fn account_options(
    &self,
    direction: PaymentDirection,
    payment_type: &str,
    party_type: &str,
    company: Option<String>,
  ) -> Result<Vec<Vec<Value>>, LedgerError> {
    let company = match company {
      Some(company) => Some(company),
      None => self.default_company().await?,
    };

    let account_types = direction.account_types(payment_type, party_type);
    let filters = json!({
      "company": company,
      "is_group": 0,
      "account_type": ["in", account_types],
    });

    let rows = self.store.query("Account", Some(&filters), &["name"], None).await?;
    Ok(
      rows
        .into_iter()
        .map(|mut row| vec![row.remove("name").unwrap_or(Value::Null)])
        .collect(),
    )
  }

  /// Every mode of payment with its default account for `company`, taken
  /// from the mode's per-company account child table.
  pub async fn modes_of_payment(
    &self,
    company: &str,
    filters: Option<&Value>,
  ) -> Result<Vec<ModeOfPayment>, LedgerError> {
    let modes = self.store.query("Mode of Payment", filters, &["name"], None).await?;

    let mut result = Vec::with_capacity(modes.len());
    for mode in modes {
      let name = mode
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

      let account = self
        .store
        .field_value(
          "Mode of Payment Account",
          &json!({ "parent": name, "company": company }),
          "default_account",
          None,
        )
        .await?;

      result.push(ModeOfPayment { name, account });
    }
    Ok(result)
  }

  /// Sales tax templates with their charge rows, newest first.
  pub async fn tax_templates(&self) -> Result<Vec<TaxTemplate>, LedgerError> {
    let rows = self
      .store
      .query(
        "Sales Taxes and Charges Template",
        None,
        &["name", "title"],
        Some("creation desc"),
      )
      .await?;

    let mut templates = Vec::with_capacity(rows.len());
    for row in rows {
      let Some(name) = row.get("name").and_then(Value::as_str) else {
        continue;
      };

      let doc = self.store.get("Sales Taxes and Charges Template", name).await?;
      let taxes = doc
        .children("taxes")
        .iter()
        .map(|tax| TaxCharge {
          charge_type: tax.get("charge_type").cloned(),
          account_head: tax.get("account_head").cloned(),
          description: tax.get("description").cloned(),
          rate: tax
            .get("rate")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok()),
        })
        .collect();

      templates.push(TaxTemplate {
        name: name.to_string(),
        title: doc.get("title").cloned(),
        taxes,
      });
    }
    Ok(templates)
  }

  pub async fn exchange_rate(
    &self,
    from_currency: &str,
    to_currency: &str,
    transaction_date: Option<&str>,
  ) -> Result<Decimal, LedgerError> {
    self
      .exchange_rates
      .rate(from_currency, to_currency, transaction_date)
      .await
  }

  pub async fn payment_party_details(
    &self,
    company: Option<&str>,
    party_type: &str,
    party: &str,
    date: &str,
    cost_center: Option<&str>,
  ) -> Result<Value, LedgerError> {
    self
      .parties
      .payment_party_details(company, party_type, party, date, cost_center)
      .await
  }

  pub async fn party_details(&self, query: PartyDetailsQuery) -> Result<Value, LedgerError> {
    self.parties.party_details(query).await
  }

  pub async fn party_account(
    &self,
    party_type: &str,
    party: &str,
    company: &str,
  ) -> Result<Value, LedgerError> {
    self.parties.party_account(party_type, party, company).await
  }

  pub async fn outstanding_documents(&self, args: Value) -> Result<Value, LedgerError> {
    self.outstanding.outstanding_for(args).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_account_types_follow_payment_direction() {
    assert_eq!(
      PaymentDirection::PaidTo.account_types("Receive", "Customer"),
      vec!["Bank", "Cash"]
    );
    assert_eq!(
      PaymentDirection::PaidTo.account_types("Internal Transfer", "Supplier"),
      vec!["Bank", "Cash"]
    );
    assert_eq!(
      PaymentDirection::PaidTo.account_types("Pay", "Customer"),
      vec!["Receivable"]
    );
    assert_eq!(
      PaymentDirection::PaidTo.account_types("Pay", "Supplier"),
      vec!["Payable"]
    );

    assert_eq!(
      PaymentDirection::PaidFrom.account_types("Pay", "Supplier"),
      vec!["Bank", "Cash"]
    );
    assert_eq!(
      PaymentDirection::PaidFrom.account_types("Receive", "Customer"),
      vec!["Receivable"]
    );
    assert_eq!(
      PaymentDirection::PaidFrom.account_types("Receive", "Employee"),
      vec!["Payable"]
    );
  }
}
