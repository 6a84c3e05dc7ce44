use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::catalog::{CatalogError, CatalogService};

#[derive(Debug, Deserialize)]
pub struct ItemDetailsCommand {
  /// Transaction context (item, price list, company, ...); forwarded to
  /// the inventory engine verbatim.
  pub args: Value,
}

pub struct ItemDetailsUseCase {
  catalog: Arc<CatalogService>,
}

impl ItemDetailsUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, command: ItemDetailsCommand) -> Result<Value, CatalogError> {
    self.catalog.item_details(command.args).await
  }
}
