pub mod memory;
pub mod rest;

use std::sync::Arc;

use crate::domain::catalog::ItemLookup;
use crate::domain::docs::{DocumentStore, DynamicLinks, ErrorLog, PermissionChecker};
use crate::domain::ledger::{ExchangeRates, OutstandingDocuments, PartyResolver};
use crate::infrastructure::config::BackendConfig;

pub use memory::MemoryBackend;
pub use rest::RestBackend;

/// All collaborator ports of one backend, as shareable trait objects.
/// Keeps `main` wiring independent of which adapter is selected.
#[derive(Clone)]
pub struct BackendHandles {
  pub store: Arc<dyn DocumentStore>,
  pub permissions: Arc<dyn PermissionChecker>,
  pub links: Arc<dyn DynamicLinks>,
  pub error_log: Arc<dyn ErrorLog>,
  pub exchange_rates: Arc<dyn ExchangeRates>,
  pub parties: Arc<dyn PartyResolver>,
  pub outstanding: Arc<dyn OutstandingDocuments>,
  pub items: Arc<dyn ItemLookup>,
}

impl BackendHandles {
  pub fn rest(config: &BackendConfig) -> Result<Self, rest::RestBackendError> {
    let backend = Arc::new(RestBackend::new(config)?);
    Ok(Self::from_arc(backend))
  }

  pub fn memory() -> Self {
    Self::from_arc(Arc::new(MemoryBackend::with_standard_metas()))
  }

  fn from_arc<B>(backend: Arc<B>) -> Self
  where
    B: DocumentStore
      + PermissionChecker
      + DynamicLinks
      + ErrorLog
      + ExchangeRates
      + PartyResolver
      + OutstandingDocuments
      + ItemLookup
      + 'static,
  {
    Self {
      store: backend.clone(),
      permissions: backend.clone(),
      links: backend.clone(),
      error_log: backend.clone(),
      exchange_rates: backend.clone(),
      parties: backend.clone(),
      outstanding: backend.clone(),
      items: backend,
    }
  }
}
