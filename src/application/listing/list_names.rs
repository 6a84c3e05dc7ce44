use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::domain::docs::{DocError, DocumentService};

/// One generic use case behind every name-listing endpoint (customers,
/// suppliers, warehouses, ...); each route binds its own doctype.
#[derive(Debug, Deserialize)]
pub struct ListNamesCommand {
  pub filters: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct NameRow {
  pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ListNamesResponse {
  pub rows: Vec<NameRow>,
}

pub struct ListNamesUseCase {
  documents: Arc<DocumentService>,
}

impl ListNamesUseCase {
  pub fn new(documents: Arc<DocumentService>) -> Self {
    Self { documents }
  }

  pub async fn execute(&self, doctype: &str, command: ListNamesCommand) -> Result<ListNamesResponse, DocError> {
    let names = self.documents.names(doctype, command.filters.as_ref()).await?;
    Ok(ListNamesResponse {
      rows: names.into_iter().map(|name| NameRow { name }).collect(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::docs::Document;
  use crate::infrastructure::backend::MemoryBackend;
  use serde_json::json;

  #[tokio::test]
  async fn test_names_are_wrapped_as_objects() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    for name in ["CUST-A", "CUST-B"] {
      let mut customer = Document::new("Customer");
      customer.set_name(name);
      backend.seed(customer);
    }

    let use_case = ListNamesUseCase::new(Arc::new(DocumentService::new(backend.clone(), backend.clone())));
    let response = use_case
      .execute("Customer", ListNamesCommand { filters: None })
      .await
      .unwrap();

    let serialized = serde_json::to_value(&response.rows).unwrap();
    assert_eq!(serialized, json!([{"name": "CUST-A"}, {"name": "CUST-B"}]));
  }

  #[tokio::test]
  async fn test_filters_are_passed_through() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    let mut local = Document::new("Customer");
    local.set_name("LOCAL");
    local.set("territory", json!("Jordan"));
    backend.seed(local);
    let mut foreign = Document::new("Customer");
    foreign.set_name("FOREIGN");
    foreign.set("territory", json!("Rest Of The World"));
    backend.seed(foreign);

    let use_case = ListNamesUseCase::new(Arc::new(DocumentService::new(backend.clone(), backend.clone())));
    let response = use_case
      .execute(
        "Customer",
        ListNamesCommand {
          filters: Some(json!({ "territory": "Jordan" })),
        },
      )
      .await
      .unwrap();

    assert_eq!(response.rows.len(), 1);
    assert_eq!(response.rows[0].name, "LOCAL");
  }
}
