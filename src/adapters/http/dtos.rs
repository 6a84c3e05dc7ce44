use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
  pub error: String,
  pub message: String,
}

/// Body of every write endpoint: one named `args` member carrying the
/// record payload (object, or JSON-encoded string of one).
#[derive(Debug, Deserialize)]
pub struct ArgsRequest {
  pub args: Value,
}

/// Optional caller-supplied filters, forwarded to the store untouched.
#[derive(Debug, Default, Deserialize)]
pub struct FiltersRequest {
  pub filters: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct GetUserRequest {
  pub user: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentEntryRequest {
  pub payment_entry: String,
}

#[derive(Debug, Deserialize)]
pub struct SalesInvoiceRequest {
  pub sales_invoice: String,
}

#[derive(Debug, Deserialize)]
pub struct PurchaseInvoiceRequest {
  pub purchase_invoice: String,
}

#[derive(Debug, Deserialize)]
pub struct ExchangeRateRequest {
  pub from_currency: String,
  pub to_currency: String,
  pub transaction_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentPartyDetailsRequest {
  pub party_type: String,
  pub party: String,
  pub date: NaiveDate,
  pub company: Option<String>,
  pub cost_center: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AccountOptionsRequest {
  pub payment_type: String,
  pub party_type: String,
  pub company: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartyDetailsRequest {
  pub party_type: String,
  pub party: String,
  pub posting_date: Option<String>,
  pub company: Option<String>,
  pub account: Option<String>,
  pub price_list: Option<String>,
  pub pos_profile: Option<String>,
  pub doctype: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartyAccountRequest {
  pub party_type: String,
  pub party: String,
  pub company: String,
}

#[derive(Debug, Deserialize)]
pub struct ConversionFactorRequest {
  pub item_code: String,
  pub uom: String,
}

#[derive(Debug, Deserialize)]
pub struct ModesOfPaymentRequest {
  pub company: String,
  pub filters: Option<Value>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
  #[validate(length(min = 1, message = "customer_name is required"))]
  pub customer_name: String,

  #[validate(length(min = 1, message = "phone is required"))]
  pub phone: String,

  #[validate(length(min = 1, message = "address_line1 is required"))]
  pub address_line1: String,

  pub city: Option<String>,
  pub country: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_create_customer_request_validation() {
    let valid = CreateCustomerRequest {
      customer_name: "Jamal Trading".to_string(),
      phone: "+9627912345".to_string(),
      address_line1: "12 Market St".to_string(),
      city: None,
      country: None,
    };
    assert!(valid.validate().is_ok());

    let invalid = CreateCustomerRequest {
      customer_name: "".to_string(),
      phone: "+9627912345".to_string(),
      address_line1: "12 Market St".to_string(),
      city: None,
      country: None,
    };
    assert!(invalid.validate().is_err());
  }

  #[test]
  fn test_args_request_accepts_object_or_string() {
    let from_object: ArgsRequest = serde_json::from_value(json!({"args": {"paid_amount": 1}})).unwrap();
    assert!(from_object.args.is_object());

    let from_string: ArgsRequest = serde_json::from_value(json!({"args": "{\"paid_amount\": 1}"})).unwrap();
    assert!(from_string.args.is_string());
  }

  #[test]
  fn test_filters_request_defaults_to_none() {
    let empty: FiltersRequest = serde_json::from_value(json!({})).unwrap();
    assert!(empty.filters.is_none());
  }
}
