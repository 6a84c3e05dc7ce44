use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::directory::{DirectoryError, DirectoryService, NewCustomer};
use crate::domain::docs::ErrorLog;

#[derive(Debug, Deserialize)]
pub struct CreateCustomerCommand {
  pub customer_name: String,
  pub phone: String,
  pub address_line1: String,
  pub city: Option<String>,
  pub country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateCustomerResponse {
  pub customer_id: String,
  pub customer_name: String,
}

pub struct CreateCustomerUseCase {
  directory: Arc<DirectoryService>,
  error_log: Arc<dyn ErrorLog>,
}

impl CreateCustomerUseCase {
  pub fn new(directory: Arc<DirectoryService>, error_log: Arc<dyn ErrorLog>) -> Self {
    Self { directory, error_log }
  }

  pub async fn execute(&self, command: CreateCustomerCommand) -> Result<CreateCustomerResponse, DirectoryError> {
    let result = self
      .directory
      .create_customer(NewCustomer {
        customer_name: command.customer_name,
        phone: command.phone,
        address_line1: command.address_line1,
        city: command.city,
        country: command.country,
      })
      .await;

    match result {
      Ok(created) => Ok(CreateCustomerResponse {
        customer_id: created.customer_id,
        customer_name: created.customer_name,
      }),
      Err(e) => {
        self
          .error_log
          .record("Create Customer API Error", &e.to_string())
          .await;
        Err(e)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::docs::Document;
  use crate::infrastructure::backend::MemoryBackend;
  use serde_json::json;

  fn seed_defaults(backend: &MemoryBackend) {
    let mut group = Document::new("Customer Group");
    group.set_name("All Customer Groups");
    backend.seed(group);
    let mut territory = Document::new("Territory");
    territory.set_name("All Territories");
    backend.seed(territory);
  }

  fn use_case(backend: &Arc<MemoryBackend>) -> CreateCustomerUseCase {
    CreateCustomerUseCase::new(
      Arc::new(DirectoryService::new(backend.clone(), backend.clone())),
      backend.clone(),
    )
  }

  #[tokio::test]
  async fn test_customer_gets_first_group_and_linked_address() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    seed_defaults(&backend);

    let response = use_case(&backend)
      .execute(CreateCustomerCommand {
        customer_name: "Jamal Trading".to_string(),
        phone: "+9627912345".to_string(),
        address_line1: "12 Market St".to_string(),
        city: Some("Amman".to_string()),
        country: None,
      })
      .await
      .unwrap();

    let customer = backend.stored("Customer", &response.customer_id).unwrap();
    assert_eq!(customer.get("customer_group"), Some(&json!("All Customer Groups")));
    assert_eq!(customer.get("territory"), Some(&json!("All Territories")));
    assert_eq!(customer.get("customer_type"), Some(&json!("Individual")));

    assert_eq!(backend.count("Address"), 1);
    let address = backend.stored("Address", "ADDRESS-00001").unwrap();
    assert_eq!(address.get("address_type"), Some(&json!("Billing")));
    assert_eq!(
      address.children("links")[0].get("link_name"),
      Some(&json!(response.customer_id))
    );
  }

  #[tokio::test]
  async fn test_missing_customer_group_is_reported_and_logged() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());

    let err = use_case(&backend)
      .execute(CreateCustomerCommand {
        customer_name: "Nobody".to_string(),
        phone: "1".to_string(),
        address_line1: "x".to_string(),
        city: None,
        country: None,
      })
      .await
      .unwrap_err();

    assert_eq!(err.to_string(), "No Customer Group found in the system.");
    let log = backend.error_log_entries();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].0, "Create Customer API Error");
  }

  #[tokio::test]
  async fn test_country_falls_back_to_the_system_default() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    seed_defaults(&backend);
    backend.set_single("System Settings", "country", json!("Jordan"));

    use_case(&backend)
      .execute(CreateCustomerCommand {
        customer_name: "Local".to_string(),
        phone: "2".to_string(),
        address_line1: "y".to_string(),
        city: None,
        country: None,
      })
      .await
      .unwrap();

    let address = backend.stored("Address", "ADDRESS-00001").unwrap();
    assert_eq!(address.get("country"), Some(&json!("Jordan")));
  }
}
