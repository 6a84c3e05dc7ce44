use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::catalog::{CatalogError, CatalogService};

#[derive(Debug, Deserialize)]
pub struct ConversionFactorCommand {
  pub item_code: String,
  pub uom: String,
}

pub struct ConversionFactorUseCase {
  catalog: Arc<CatalogService>,
}

impl ConversionFactorUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, command: ConversionFactorCommand) -> Result<Value, CatalogError> {
    self
      .catalog
      .conversion_factor(&command.item_code, &command.uom)
      .await
  }
}
