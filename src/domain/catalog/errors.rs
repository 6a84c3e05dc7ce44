use thiserror::Error;

use crate::domain::docs::DocStoreError;

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error(transparent)]
  Store(#[from] DocStoreError),

  #[error("{0}")]
  Upstream(String),
}
