use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::docs::DocumentStore;

use super::errors::CatalogError;
use super::ports::ItemLookup;

/// Item row shaped for the mobile catalog screen. `barcodes` is always
/// present, empty for items without barcode rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemOverview {
  pub name: String,
  pub item_name: Option<Value>,
  pub item_group: Option<Value>,
  pub image: Option<Value>,
  pub standard_rate: Option<Value>,
  pub barcodes: Vec<String>,
}

pub struct CatalogService {
  store: Arc<dyn DocumentStore>,
  items: Arc<dyn ItemLookup>,
}

impl CatalogService {
  pub fn new(store: Arc<dyn DocumentStore>, items: Arc<dyn ItemLookup>) -> Self {
    Self { store, items }
  }

  /// Catalog rows with their barcodes attached, filters passed through to
  /// the store untouched.
  pub async fn items_overview(&self, filters: Option<&Value>) -> Result<Vec<ItemOverview>, CatalogError> {
    let rows = self
      .store
      .query(
        "Item",
        filters,
        &["name", "item_name", "item_group", "image", "standard_rate"],
        None,
      )
      .await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
      let Some(name) = row.get("name").and_then(Value::as_str) else {
        continue;
      };

      let barcode_rows = self
        .store
        .query("Item Barcode", Some(&json!({ "parent": name })), &["barcode"], None)
        .await?;

      let barcodes = barcode_rows
        .into_iter()
        .filter_map(|mut b| match b.remove("barcode") {
          Some(Value::String(code)) => Some(code),
          _ => None,
        })
        .collect();

      items.push(ItemOverview {
        name: name.to_string(),
        item_name: row.get("item_name").cloned(),
        item_group: row.get("item_group").cloned(),
        image: row.get("image").cloned(),
        standard_rate: row.get("standard_rate").cloned(),
        barcodes,
      });
    }
    Ok(items)
  }

  pub async fn item_details(&self, args: Value) -> Result<Value, CatalogError> {
    self.items.item_details(args).await
  }

  pub async fn conversion_factor(&self, item_code: &str, uom: &str) -> Result<Value, CatalogError> {
    self.items.conversion_factor(item_code, uom).await
  }
}
