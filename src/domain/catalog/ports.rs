use async_trait::async_trait;
use serde_json::Value;

use super::errors::CatalogError;

/// Item pricing/stock lookups delegated verbatim to the inventory engine.
#[async_trait]
pub trait ItemLookup: Send + Sync {
  /// Full item details for a transaction context; `args` is forwarded
  /// untouched and the result returned as the engine shaped it.
  async fn item_details(&self, args: Value) -> Result<Value, CatalogError>;

  /// Conversion factor between an item's stock UOM and `uom`.
  async fn conversion_factor(&self, item_code: &str, uom: &str) -> Result<Value, CatalogError>;
}
