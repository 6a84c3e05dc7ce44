use thiserror::Error;

use crate::domain::docs::DocStoreError;

#[derive(Debug, Error)]
pub enum LedgerError {
  #[error(transparent)]
  Store(#[from] DocStoreError),

  /// A business-logic collaborator (exchange rates, party resolution,
  /// outstanding documents) failed; carries its message verbatim.
  #[error("{0}")]
  Upstream(String),
}
