use async_trait::async_trait;
use serde_json::{Map, Value};

use super::entities::{DocMeta, Document};
use super::errors::DocStoreError;
use super::value_objects::AccessLevel;

/// The external document service: persistence, schema introspection and
/// generic queries. This gateway never implements storage or business rules
/// itself; everything here is a remote call.
#[async_trait]
pub trait DocumentStore: Send + Sync {
  async fn meta(&self, doctype: &str) -> Result<DocMeta, DocStoreError>;
  async fn get(&self, doctype: &str, name: &str) -> Result<Document, DocStoreError>;
  async fn exists(&self, doctype: &str, name: &str) -> Result<bool, DocStoreError>;
  async fn insert(&self, doc: Document) -> Result<Document, DocStoreError>;
  async fn save(&self, doc: Document) -> Result<Document, DocStoreError>;
  async fn commit(&self) -> Result<(), DocStoreError>;

  /// Names of records matching caller-supplied filters, passed through to
  /// the service's generic query untouched.
  async fn list_names(&self, doctype: &str, filters: Option<&Value>) -> Result<Vec<String>, DocStoreError>;

  /// Generic query-by-fields. `fields` containing `"*"` selects the full
  /// field set.
  async fn query(
    &self,
    doctype: &str,
    filters: Option<&Value>,
    fields: &[&str],
    order_by: Option<&str>,
  ) -> Result<Vec<Map<String, Value>>, DocStoreError>;

  /// Single field of the first record matching `filters`.
  async fn field_value(
    &self,
    doctype: &str,
    filters: &Value,
    field: &str,
    order_by: Option<&str>,
  ) -> Result<Option<Value>, DocStoreError>;

  /// Field of a singleton settings record.
  async fn single_value(&self, doctype: &str, field: &str) -> Result<Option<Value>, DocStoreError>;
}

/// External permission evaluation, keyed by doctype, requested access level
/// and acting user. `user` of `None` means the service's default actor.
#[async_trait]
pub trait PermissionChecker: Send + Sync {
  async fn has_permission(
    &self,
    doctype: &str,
    level: AccessLevel,
    user: Option<&str>,
  ) -> Result<bool, DocStoreError>;
}

/// Explicit lookup against the generic association table that links records
/// (e.g. an Address to the Customer it belongs to).
#[async_trait]
pub trait DynamicLinks: Send + Sync {
  /// First `doctype` record linked to (`link_doctype`, `link_name`),
  /// projected to `fields`.
  async fn first_linked(
    &self,
    doctype: &str,
    link_doctype: &str,
    link_name: &str,
    fields: &[&str],
  ) -> Result<Option<Map<String, Value>>, DocStoreError>;
}

/// The service-side error log. Recording is best-effort; failures to log
/// must never fail the request.
#[async_trait]
pub trait ErrorLog: Send + Sync {
  async fn record(&self, title: &str, detail: &str);
}
