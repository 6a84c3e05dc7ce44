use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::domain::catalog::{CatalogError, CatalogService, ItemOverview};

#[derive(Debug, Deserialize)]
pub struct ItemsOverviewCommand {
  pub filters: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ItemsOverviewResponse {
  pub items: Vec<ItemOverview>,
}

pub struct ItemsOverviewUseCase {
  catalog: Arc<CatalogService>,
}

impl ItemsOverviewUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, command: ItemsOverviewCommand) -> Result<ItemsOverviewResponse, CatalogError> {
    let items = self.catalog.items_overview(command.filters.as_ref()).await?;
    Ok(ItemsOverviewResponse { items })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::docs::Document;
  use crate::infrastructure::backend::MemoryBackend;
  use serde_json::json;

  #[tokio::test]
  async fn test_items_without_barcodes_get_an_empty_list() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    let mut plain = Document::new("Item");
    plain.set_name("PLAIN");
    plain.set("item_name", json!("Plain Item"));
    backend.seed(plain);

    let mut coded = Document::new("Item");
    coded.set_name("CODED");
    let mut barcode = Document::new("Item Barcode");
    barcode.set("barcode", json!("5901234123457"));
    coded.append_child("barcodes", barcode);
    backend.seed(coded);

    let use_case =
      ItemsOverviewUseCase::new(Arc::new(CatalogService::new(backend.clone(), backend.clone())));
    let response = use_case
      .execute(ItemsOverviewCommand { filters: None })
      .await
      .unwrap();

    assert_eq!(response.items.len(), 2);
    assert!(response.items[0].barcodes.is_empty());
    assert_eq!(response.items[1].barcodes, vec!["5901234123457".to_string()]);
  }
}
