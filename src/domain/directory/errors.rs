use thiserror::Error;

use crate::domain::docs::DocStoreError;

#[derive(Debug, Error)]
pub enum DirectoryError {
  #[error("No Customer Group found in the system.")]
  NoCustomerGroup,

  #[error("No Territory found in the system.")]
  NoTerritory,

  #[error(transparent)]
  Store(#[from] DocStoreError),
}
