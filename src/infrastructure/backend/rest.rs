use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::domain::catalog::{CatalogError, ItemLookup};
use crate::domain::docs::{
  AccessLevel, DocMeta, DocStoreError, Document, DocumentStore, DynamicLinks, ErrorLog, PermissionChecker,
};
use crate::domain::ledger::{ExchangeRates, LedgerError, OutstandingDocuments, PartyDetailsQuery, PartyResolver};
use crate::infrastructure::config::BackendConfig;

#[derive(Debug, Error)]
pub enum RestBackendError {
  #[error("invalid backend configuration: {0}")]
  InvalidConfig(String),

  #[error("failed to build HTTP client: {0}")]
  Client(#[from] reqwest::Error),
}

/// Adapter onto the remote document service's REST API.
///
/// Resource endpoints (`/api/resource/...`) cover persistence and generic
/// queries; whitelisted methods (`/api/method/...`) cover everything the
/// business engines compute server-side. Authentication is the token
/// key/secret pair from [`BackendConfig`].
pub struct RestBackend {
  client: Client,
  base_url: String,
  auth_header: Option<String>,
  // Doctype schemas are stable for the life of the process.
  meta_cache: RwLock<HashMap<String, DocMeta>>,
}

impl RestBackend {
  pub fn new(config: &BackendConfig) -> Result<Self, RestBackendError> {
    if config.url.is_empty() {
      return Err(RestBackendError::InvalidConfig("backend.url is empty".to_string()));
    }

    let auth_header = match (&config.api_key, &config.api_secret) {
      (Some(key), Some(secret)) => Some(format!("token {}:{}", key, secret)),
      (None, None) => None,
      _ => {
        return Err(RestBackendError::InvalidConfig(
          "backend.api_key and backend.api_secret must be set together".to_string(),
        ));
      }
    };

    let client = Client::builder()
      .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
      .timeout(Duration::from_secs(config.request_timeout_seconds))
      .build()?;

    Ok(Self {
      client,
      base_url: config.url.trim_end_matches('/').to_string(),
      auth_header,
      meta_cache: RwLock::new(HashMap::new()),
    })
  }

  fn method_url(&self, method: &str) -> String {
    format!("{}/api/method/{}", self.base_url, method)
  }

  fn resource_url(&self, doctype: &str, name: Option<&str>) -> String {
    match name {
      Some(name) => format!("{}/api/resource/{}/{}", self.base_url, doctype, name),
      None => format!("{}/api/resource/{}", self.base_url, doctype),
    }
  }

  fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match &self.auth_header {
      Some(header) => request.header(reqwest::header::AUTHORIZATION, header),
      None => request,
    }
  }

  async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, DocStoreError> {
    let response = self
      .authorized(request)
      .send()
      .await
      .map_err(|e| DocStoreError::Unavailable(e.to_string()))?;

    let status = response.status();
    let body: Value = response
      .json()
      .await
      .map_err(|e| DocStoreError::Malformed(e.to_string()))?;

    if status.is_success() {
      return Ok(body);
    }
    if status.is_server_error() {
      return Err(DocStoreError::Unavailable(extract_error_message(&body)));
    }
    Err(DocStoreError::Rejected(extract_error_message(&body)))
  }

  /// Call a whitelisted method and unwrap its `{"message": ...}` envelope.
  async fn call_method<T: DeserializeOwned>(&self, method: &str, body: &Value) -> Result<T, DocStoreError> {
    let value = self.send(self.client.post(self.method_url(method)).json(body)).await?;
    let message = value.get("message").cloned().unwrap_or(Value::Null);
    serde_json::from_value(message).map_err(|e| DocStoreError::Malformed(e.to_string()))
  }

  /// Unwrap a resource endpoint's `{"data": ...}` envelope.
  fn unwrap_data(value: Value) -> Result<Value, DocStoreError> {
    match value {
      Value::Object(mut object) => object
        .remove("data")
        .ok_or_else(|| DocStoreError::Malformed("missing data field".to_string())),
      _ => Err(DocStoreError::Malformed("response is not an object".to_string())),
    }
  }

  async fn fetch_resource(&self, doctype: &str, name: &str) -> Result<Map<String, Value>, DocStoreError> {
    let response = self
      .authorized(self.client.get(self.resource_url(doctype, Some(name))))
      .send()
      .await
      .map_err(|e| DocStoreError::Unavailable(e.to_string()))?;

    if response.status() == StatusCode::NOT_FOUND {
      return Err(DocStoreError::NotFound {
        doctype: doctype.to_string(),
        name: name.to_string(),
      });
    }

    let status = response.status();
    let body: Value = response
      .json()
      .await
      .map_err(|e| DocStoreError::Malformed(e.to_string()))?;
    if !status.is_success() {
      if status.is_server_error() {
        return Err(DocStoreError::Unavailable(extract_error_message(&body)));
      }
      return Err(DocStoreError::Rejected(extract_error_message(&body)));
    }

    match Self::unwrap_data(body)? {
      Value::Object(object) => Ok(object),
      _ => Err(DocStoreError::Malformed("record is not an object".to_string())),
    }
  }

  async fn cached_meta(&self, doctype: &str) -> Result<DocMeta, DocStoreError> {
    if let Ok(cache) = self.meta_cache.read() {
      if let Some(meta) = cache.get(doctype) {
        return Ok(meta.clone());
      }
    }

    let object = self.fetch_resource("DocType", doctype).await.map_err(|e| match e {
      DocStoreError::NotFound { .. } => DocStoreError::UnknownDoctype(doctype.to_string()),
      other => other,
    })?;
    let meta = parse_meta(doctype, &object);

    if let Ok(mut cache) = self.meta_cache.write() {
      cache.insert(doctype.to_string(), meta.clone());
    }
    Ok(meta)
  }
}

/// Build the allow-list schema from the service's DocType record. Sub-table
/// fields carry their child doctype in `options`. `name` and `owner` are
/// standard fields the service never lists explicitly.
fn parse_meta(doctype: &str, object: &Map<String, Value>) -> DocMeta {
  let mut meta = DocMeta::new(doctype).with_fields(["name", "owner"]);

  let Some(fields) = object.get("fields").and_then(Value::as_array) else {
    return meta;
  };
  for field in fields {
    let Some(fieldname) = field.get("fieldname").and_then(Value::as_str) else {
      continue;
    };
    let fieldtype = field.get("fieldtype").and_then(Value::as_str).unwrap_or("");
    match (fieldtype, field.get("options").and_then(Value::as_str)) {
      ("Table", Some(child_doctype)) => {
        meta = meta.with_table_field(fieldname, child_doctype);
      }
      _ => {
        meta = meta.with_fields([fieldname]);
      }
    }
  }
  meta
}

/// Best human-readable message out of a service error body.
fn extract_error_message(body: &Value) -> String {
  for key in ["message", "exception", "exc_type"] {
    if let Some(message) = body.get(key).and_then(Value::as_str) {
      if !message.is_empty() {
        return message.to_string();
      }
    }
  }
  body.to_string()
}

#[async_trait]
impl DocumentStore for RestBackend {
  async fn meta(&self, doctype: &str) -> Result<DocMeta, DocStoreError> {
    self.cached_meta(doctype).await
  }

  async fn get(&self, doctype: &str, name: &str) -> Result<Document, DocStoreError> {
    let meta = self.cached_meta(doctype).await?;
    let object = self.fetch_resource(doctype, name).await?;
    Ok(Document::from_object(doctype, object, &meta))
  }

  async fn exists(&self, doctype: &str, name: &str) -> Result<bool, DocStoreError> {
    let names = self.list_names(doctype, Some(&json!({ "name": name }))).await?;
    Ok(!names.is_empty())
  }

  async fn insert(&self, doc: Document) -> Result<Document, DocStoreError> {
    let doctype = doc.doctype().to_string();
    let meta = self.cached_meta(&doctype).await?;
    let value = self
      .send(self.client.post(self.resource_url(&doctype, None)).json(&doc.to_value()))
      .await?;
    match Self::unwrap_data(value)? {
      Value::Object(object) => Ok(Document::from_object(doctype, object, &meta)),
      _ => Err(DocStoreError::Malformed("inserted record is not an object".to_string())),
    }
  }

  async fn save(&self, doc: Document) -> Result<Document, DocStoreError> {
    let doctype = doc.doctype().to_string();
    let name = doc
      .name()
      .ok_or_else(|| DocStoreError::Malformed(format!("saving {} without a name", doctype)))?
      .to_string();
    let meta = self.cached_meta(&doctype).await?;
    let value = self
      .send(
        self
          .client
          .put(self.resource_url(&doctype, Some(&name)))
          .json(&doc.to_value()),
      )
      .await?;
    match Self::unwrap_data(value)? {
      Value::Object(object) => Ok(Document::from_object(doctype, object, &meta)),
      _ => Err(DocStoreError::Malformed("saved record is not an object".to_string())),
    }
  }

  async fn commit(&self) -> Result<(), DocStoreError> {
    // The REST API commits each successful request on its own; there is no
    // separate transaction boundary to flush.
    Ok(())
  }

  async fn list_names(&self, doctype: &str, filters: Option<&Value>) -> Result<Vec<String>, DocStoreError> {
    let rows = self.query(doctype, filters, &["name"], None).await?;
    Ok(
      rows
        .into_iter()
        .filter_map(|mut row| match row.remove("name") {
          Some(Value::String(name)) => Some(name),
          _ => None,
        })
        .collect(),
    )
  }

  async fn query(
    &self,
    doctype: &str,
    filters: Option<&Value>,
    fields: &[&str],
    order_by: Option<&str>,
  ) -> Result<Vec<Map<String, Value>>, DocStoreError> {
    let mut params = vec![
      ("fields".to_string(), Value::from(fields.to_vec()).to_string()),
      ("limit_page_length".to_string(), "0".to_string()),
    ];
    if let Some(filters) = filters {
      params.push(("filters".to_string(), filters.to_string()));
    }
    if let Some(order_by) = order_by {
      params.push(("order_by".to_string(), order_by.to_string()));
    }

    let value = self
      .send(self.client.get(self.resource_url(doctype, None)).query(&params))
      .await?;
    match Self::unwrap_data(value)? {
      Value::Array(rows) => rows
        .into_iter()
        .map(|row| match row {
          Value::Object(object) => Ok(object),
          _ => Err(DocStoreError::Malformed("query row is not an object".to_string())),
        })
        .collect(),
      _ => Err(DocStoreError::Malformed("query result is not an array".to_string())),
    }
  }

  async fn field_value(
    &self,
    doctype: &str,
    filters: &Value,
    field: &str,
    order_by: Option<&str>,
  ) -> Result<Option<Value>, DocStoreError> {
    // frappe.client.get_value ignores ordering, so go through the resource
    // query (which honors order_by) and take the first row.
    let mut rows = self.query(doctype, Some(filters), &[field], order_by).await?;
    Ok(rows.first_mut().and_then(|row| row.remove(field)))
  }

  async fn single_value(&self, doctype: &str, field: &str) -> Result<Option<Value>, DocStoreError> {
    let body = json!({ "doctype": doctype, "field": field });
    let message: Value = self.call_method("frappe.client.get_single_value", &body).await?;
    match message {
      Value::Null => Ok(None),
      other => Ok(Some(other)),
    }
  }
}

#[async_trait]
impl PermissionChecker for RestBackend {
  async fn has_permission(
    &self,
    doctype: &str,
    level: AccessLevel,
    user: Option<&str>,
  ) -> Result<bool, DocStoreError> {
    let mut body = json!({ "doctype": doctype, "ptype": level.as_str() });
    if let Some(user) = user {
      body["user"] = Value::String(user.to_string());
    }

    let message: Value = self.call_method("frappe.has_permission", &body).await?;
    // The service answers either a bare boolean or {"has_permission": 0|1}.
    let granted = match &message {
      Value::Bool(b) => *b,
      Value::Object(object) => object
        .get("has_permission")
        .is_some_and(|v| v.as_bool().unwrap_or(false) || v.as_i64().unwrap_or(0) != 0),
      _ => false,
    };
    Ok(granted)
  }
}

#[async_trait]
impl DynamicLinks for RestBackend {
  async fn first_linked(
    &self,
    doctype: &str,
    link_doctype: &str,
    link_name: &str,
    fields: &[&str],
  ) -> Result<Option<Map<String, Value>>, DocStoreError> {
    let filters = json!({
      "parenttype": doctype,
      "link_doctype": link_doctype,
      "link_name": link_name,
    });
    let links = self.query("Dynamic Link", Some(&filters), &["parent"], None).await?;
    let Some(parent) = links.first().and_then(|row| row.get("parent")).and_then(Value::as_str) else {
      return Ok(None);
    };

    let rows = self
      .query(doctype, Some(&json!({ "name": parent })), fields, None)
      .await?;
    Ok(rows.into_iter().next())
  }
}

#[async_trait]
impl ErrorLog for RestBackend {
  async fn record(&self, title: &str, detail: &str) {
    let body = json!({ "method": title, "error": detail });
    let result = self
      .send(self.client.post(self.resource_url("Error Log", None)).json(&body))
      .await;
    if let Err(e) = result {
      tracing::warn!(error = %e, title, "failed to record error log entry");
    }
  }
}

#[async_trait]
impl ExchangeRates for RestBackend {
  async fn rate(
    &self,
    from_currency: &str,
    to_currency: &str,
    transaction_date: Option<&str>,
  ) -> Result<Decimal, LedgerError> {
    let mut body = json!({ "from_currency": from_currency, "to_currency": to_currency });
    if let Some(date) = transaction_date {
      body["transaction_date"] = Value::String(date.to_string());
    }

    self
      .call_method("erpnext.setup.utils.get_exchange_rate", &body)
      .await
      .map_err(|e| LedgerError::Upstream(e.to_string()))
  }
}

#[async_trait]
impl PartyResolver for RestBackend {
  async fn payment_party_details(
    &self,
    company: Option<&str>,
    party_type: &str,
    party: &str,
    date: &str,
    cost_center: Option<&str>,
  ) -> Result<Value, LedgerError> {
    let body = json!({
      "company": company,
      "party_type": party_type,
      "party": party,
      "date": date,
      "cost_center": cost_center,
    });
    self
      .call_method(
        "erpnext.accounts.doctype.payment_entry.payment_entry.get_party_details",
        &body,
      )
      .await
      .map_err(|e| LedgerError::Upstream(e.to_string()))
  }

  async fn party_details(&self, query: PartyDetailsQuery) -> Result<Value, LedgerError> {
    let body = json!({
      "party_type": query.party_type,
      "party": query.party,
      "posting_date": query.posting_date,
      "company": query.company,
      "account": query.account,
      "price_list": query.price_list,
      "pos_profile": query.pos_profile,
      "doctype": query.doctype,
    });
    self
      .call_method("erpnext.accounts.party.get_party_details", &body)
      .await
      .map_err(|e| LedgerError::Upstream(e.to_string()))
  }

  async fn party_account(&self, party_type: &str, party: &str, company: &str) -> Result<Value, LedgerError> {
    let body = json!({ "party_type": party_type, "party": party, "company": company });
    self
      .call_method("erpnext.accounts.party.get_party_account", &body)
      .await
      .map_err(|e| LedgerError::Upstream(e.to_string()))
  }
}

#[async_trait]
impl OutstandingDocuments for RestBackend {
  async fn outstanding_for(&self, args: Value) -> Result<Value, LedgerError> {
    let body = json!({ "args": args });
    self
      .call_method(
        "erpnext.accounts.doctype.payment_entry.payment_entry.get_outstanding_reference_documents",
        &body,
      )
      .await
      .map_err(|e| LedgerError::Upstream(e.to_string()))
  }
}

#[async_trait]
impl ItemLookup for RestBackend {
  async fn item_details(&self, args: Value) -> Result<Value, CatalogError> {
    let body = json!({ "args": args });
    self
      .call_method("erpnext.stock.get_item_details.get_item_details", &body)
      .await
      .map_err(|e| CatalogError::Upstream(e.to_string()))
  }

  async fn conversion_factor(&self, item_code: &str, uom: &str) -> Result<Value, CatalogError> {
    let body = json!({ "item_code": item_code, "uom": uom });
    self
      .call_method("erpnext.stock.get_item_details.get_conversion_factor", &body)
      .await
      .map_err(|e| CatalogError::Upstream(e.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::config::BackendMode;

  fn test_config() -> BackendConfig {
    BackendConfig {
      mode: BackendMode::Rest,
      url: "http://erp.local:8000/".to_string(),
      api_key: Some("key".to_string()),
      api_secret: Some("secret".to_string()),
      connect_timeout_seconds: 5,
      request_timeout_seconds: 30,
    }
  }

  #[test]
  fn test_urls_are_built_from_trimmed_base() {
    let backend = RestBackend::new(&test_config()).expect("backend should build");
    assert_eq!(
      backend.method_url("frappe.has_permission"),
      "http://erp.local:8000/api/method/frappe.has_permission"
    );
    assert_eq!(
      backend.resource_url("Payment Entry", Some("PE-00001")),
      "http://erp.local:8000/api/resource/Payment Entry/PE-00001"
    );
    assert_eq!(
      backend.resource_url("Customer", None),
      "http://erp.local:8000/api/resource/Customer"
    );
  }

  #[test]
  fn test_api_key_without_secret_is_rejected() {
    let config = BackendConfig {
      api_secret: None,
      ..test_config()
    };
    assert!(matches!(
      RestBackend::new(&config),
      Err(RestBackendError::InvalidConfig(_))
    ));
  }

  #[test]
  fn test_parse_meta_splits_table_fields() {
    let object = json!({
      "fields": [
        {"fieldname": "paid_amount", "fieldtype": "Currency"},
        {"fieldname": "references", "fieldtype": "Table", "options": "Payment Entry Reference"},
        {"fieldname": "party_type", "fieldtype": "Link", "options": "DocType"}
      ]
    });
    let Value::Object(object) = object else { unreachable!() };

    let meta = parse_meta("Payment Entry", &object);
    assert!(meta.has_field("paid_amount"));
    assert!(meta.has_field("party_type"));
    assert!(meta.has_field("name"));
    assert_eq!(meta.child_doctype("references"), Some("Payment Entry Reference"));
    assert!(!meta.has_field("references"));
  }

  #[actix_web::test]
  async fn test_field_value_queries_the_resource_path_with_order_by() {
    use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
    use std::sync::{Arc, Mutex};

    let requests: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let captured = requests.clone();
    let server = HttpServer::new(move || {
      let captured = captured.clone();
      App::new().default_service(web::to(move |req: HttpRequest| {
        let captured = captured.clone();
        async move {
          captured
            .lock()
            .unwrap()
            .push(format!("{}?{}", req.path(), req.query_string()));
          HttpResponse::Ok().json(json!({ "data": [{"name": "CG-0001"}, {"name": "CG-0002"}] }))
        }
      }))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("stub service should bind");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    let config = BackendConfig {
      url: format!("http://{}", addr),
      api_key: None,
      api_secret: None,
      ..test_config()
    };
    let backend = RestBackend::new(&config).expect("backend should build");

    let value = backend
      .field_value("Customer Group", &json!({}), "name", Some("creation asc"))
      .await
      .expect("lookup should succeed");
    assert_eq!(value, Some(json!("CG-0001")));

    let seen = requests.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].starts_with("/api/resource/Customer%20Group?"), "got {}", seen[0]);
    assert!(seen[0].contains("order_by=creation"), "got {}", seen[0]);
  }

  #[test]
  fn test_extract_error_message_prefers_message_field() {
    let body = json!({"message": "Insufficient Permission", "exception": "frappe.PermissionError"});
    assert_eq!(extract_error_message(&body), "Insufficient Permission");

    let body = json!({"exception": "frappe.ValidationError: missing field"});
    assert_eq!(extract_error_message(&body), "frappe.ValidationError: missing field");

    let body = json!({"weird": true});
    assert_eq!(extract_error_message(&body), "{\"weird\":true}");
  }
}
