use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::docs::{Document, DocumentStore, DynamicLinks};

use super::errors::DirectoryError;

/// Input of the quick customer-creation endpoint.
#[derive(Debug, Clone)]
pub struct NewCustomer {
  pub customer_name: String,
  pub phone: String,
  pub address_line1: String,
  pub city: Option<String>,
  pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerCreated {
  pub customer_id: String,
  pub customer_name: String,
}

/// One row of the customer directory: the customer plus the fields of its
/// first linked billing address (nulls when no address is linked).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRecord {
  pub customer_id: String,
  pub customer_name: Option<Value>,
  pub phone: Option<Value>,
  pub address_line1: Option<Value>,
  pub city: Option<Value>,
  pub country: Option<Value>,
}

/// Customer directory operations: creation with a linked billing address,
/// and the joined directory listing.
pub struct DirectoryService {
  store: Arc<dyn DocumentStore>,
  links: Arc<dyn DynamicLinks>,
}

impl DirectoryService {
  pub fn new(store: Arc<dyn DocumentStore>, links: Arc<dyn DynamicLinks>) -> Self {
    Self { store, links }
  }

  /// Create an Individual customer under the first available customer
  /// group and territory, then a Billing address linked to it through the
  /// generic link table. Country falls back to the system default.
  pub async fn create_customer(&self, data: NewCustomer) -> Result<CustomerCreated, DirectoryError> {
    let customer_group = self
      .store
      .field_value("Customer Group", &json!({}), "name", Some("creation asc"))
      .await?
      .and_then(|v| v.as_str().map(str::to_string))
      .ok_or(DirectoryError::NoCustomerGroup)?;

    let territory = self
      .store
      .field_value("Territory", &json!({}), "name", Some("creation asc"))
      .await?
      .and_then(|v| v.as_str().map(str::to_string))
      .ok_or(DirectoryError::NoTerritory)?;

    let country = match data.country {
      Some(country) => Some(country),
      None => self
        .store
        .single_value("System Settings", "country")
        .await?
        .and_then(|v| v.as_str().map(str::to_string)),
    };

    let mut customer = Document::new("Customer");
    customer.set("customer_name", json!(data.customer_name));
    customer.set("customer_type", json!("Individual"));
    customer.set("mobile_no", json!(data.phone));
    customer.set("customer_group", json!(customer_group));
    customer.set("territory", json!(territory));

    let customer = self.store.insert(customer).await?;
    let customer_id = customer
      .name()
      .map(str::to_string)
      .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut address = Document::new("Address");
    address.set("address_title", json!(data.customer_name));
    address.set("address_type", json!("Billing"));
    address.set("address_line1", json!(data.address_line1));
    address.set("city", json!(data.city));
    address.set("country", json!(country));

    let mut link = Document::new("Dynamic Link");
    link.set("link_doctype", json!("Customer"));
    link.set("link_name", json!(customer_id));
    address.append_child("links", link);

    self.store.insert(address).await?;
    self.store.commit().await?;

    Ok(CustomerCreated {
      customer_id,
      customer_name: data.customer_name,
    })
  }

  /// All customers, newest first, each joined with its first linked
  /// address via the generic link table.
  pub async fn all_customers(&self) -> Result<Vec<CustomerRecord>, DirectoryError> {
    let rows = self
      .store
      .query(
        "Customer",
        None,
        &["name", "customer_name", "mobile_no"],
        Some("creation desc"),
      )
      .await?;

    let mut customers = Vec::with_capacity(rows.len());
    for row in rows {
      let Some(name) = row.get("name").and_then(Value::as_str) else {
        continue;
      };

      let address = self
        .links
        .first_linked("Address", "Customer", name, &["address_line1", "city", "country"])
        .await?;

      let field = |key: &str| address.as_ref().and_then(|a| a.get(key)).cloned();

      customers.push(CustomerRecord {
        customer_id: name.to_string(),
        customer_name: row.get("customer_name").cloned(),
        phone: row.get("mobile_no").cloned(),
        address_line1: field("address_line1"),
        city: field("city"),
        country: field("country"),
      });
    }
    Ok(customers)
  }
}
