use serde::Serialize;
use std::sync::Arc;

use crate::domain::directory::{CustomerRecord, DirectoryError, DirectoryService};
use crate::domain::docs::ErrorLog;

#[derive(Debug, Serialize)]
pub struct AllCustomersResponse {
  pub customers: Vec<CustomerRecord>,
}

pub struct AllCustomersUseCase {
  directory: Arc<DirectoryService>,
  error_log: Arc<dyn ErrorLog>,
}

impl AllCustomersUseCase {
  pub fn new(directory: Arc<DirectoryService>, error_log: Arc<dyn ErrorLog>) -> Self {
    Self { directory, error_log }
  }

  pub async fn execute(&self) -> Result<AllCustomersResponse, DirectoryError> {
    match self.directory.all_customers().await {
      Ok(customers) => Ok(AllCustomersResponse { customers }),
      Err(e) => {
        self.error_log.record("Get All Customers Error", &e.to_string()).await;
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

  #[tokio::test]
  async fn test_customers_come_newest_first_with_address_join() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());

    let mut first = Document::new("Customer");
    first.set("customer_name", json!("First"));
    first.set("mobile_no", json!("111"));
    let first_id = backend.seed(first);

    let mut second = Document::new("Customer");
    second.set("customer_name", json!("Second"));
    backend.seed(second);

    let mut address = Document::new("Address");
    address.set("address_line1", json!("12 Market St"));
    address.set("city", json!("Amman"));
    let mut link = Document::new("Dynamic Link");
    link.set("link_doctype", json!("Customer"));
    link.set("link_name", json!(first_id));
    address.append_child("links", link);
    backend.seed(address);

    let use_case = AllCustomersUseCase::new(
      Arc::new(DirectoryService::new(backend.clone(), backend.clone())),
      backend.clone(),
    );
    let response = use_case.execute().await.unwrap();

    assert_eq!(response.customers.len(), 2);
    // Newest first, and no linked address means null fields, not a skip.
    assert_eq!(response.customers[0].customer_name, Some(json!("Second")));
    assert_eq!(response.customers[0].address_line1, None);
    assert_eq!(response.customers[1].address_line1, Some(json!("12 Market St")));
    assert_eq!(response.customers[1].city, Some(json!("Amman")));
  }
}
