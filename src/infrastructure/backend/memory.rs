use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Map, Value, json};

use crate::domain::catalog::{CatalogError, ItemLookup};
use crate::domain::docs::{
  AccessLevel, DocMeta, DocStoreError, Document, DocumentStore, DynamicLinks, ErrorLog,
  PermissionChecker,
};
use crate::domain::ledger::{
  ExchangeRates, LedgerError, OutstandingDocuments, PartyDetailsQuery, PartyResolver,
};

/// In-memory backend implementing every collaborator port.
///
/// Serves two purposes: development mode without a document service
/// (`backend.mode = "memory"`), and the contract tests of the use cases.
/// Records are kept in insertion order, which stands in for creation order
/// when a query asks for `creation asc`/`creation desc`.
pub struct MemoryBackend {
  state: Mutex<State>,
}

#[derive(Default)]
struct State {
  metas: HashMap<String, DocMeta>,
  docs: BTreeMap<String, Vec<Document>>,
  singles: HashMap<(String, String), Value>,
  denied: HashSet<String>,
  write_failure: Option<String>,
  error_log: Vec<(String, String)>,
  commits: u64,
  exchange_rate: Option<Decimal>,
  payment_party_details: Value,
  party_details: Value,
  party_account: Value,
  outstanding: Value,
  item_details: Value,
  conversion_factor: Value,
}

impl State {
  fn meta(&self, doctype: &str) -> Result<DocMeta, DocStoreError> {
    self
      .metas
      .get(doctype)
      .cloned()
      .ok_or_else(|| DocStoreError::UnknownDoctype(doctype.to_string()))
  }

  fn fail_writes_if_poisoned(&self) -> Result<(), DocStoreError> {
    match &self.write_failure {
      Some(message) => Err(DocStoreError::Rejected(message.clone())),
      None => Ok(()),
    }
  }

  fn assign_name(&self, doc: &mut Document) {
    if doc.is_set("name") {
      return;
    }
    let prefix = doc.doctype().to_uppercase().replace(' ', "-");
    let serial = self.docs.get(doc.doctype()).map(Vec::len).unwrap_or(0) + 1;
    doc.set_name(format!("{prefix}-{serial:05}"));
  }

  /// Flat row view of every record of `doctype`, including child rows of
  /// stored parents (exposed with a `parent` field), in creation order.
  fn rows_of(&self, doctype: &str) -> Vec<Map<String, Value>> {
    if let Some(docs) = self.docs.get(doctype) {
      return docs
        .iter()
        .filter_map(|doc| match doc.to_value() {
          Value::Object(object) => Some(object),
          _ => None,
        })
        .collect();
    }

    let mut rows = Vec::new();
    for docs in self.docs.values() {
      for doc in docs {
        let fields: Vec<String> = doc.child_fields().map(str::to_string).collect();
        for field in fields {
          for child in doc.children(&field) {
            if child.doctype() != doctype {
              continue;
            }
            if let Value::Object(mut object) = child.to_value() {
              object.insert(
                "parent".to_string(),
                doc.name().map(|n| json!(n)).unwrap_or(Value::Null),
              );
              rows.push(object);
            }
          }
        }
      }
    }
    rows
  }
}

fn matches_filters(row: &Map<String, Value>, filters: Option<&Value>) -> bool {
  let Some(filters) = filters.and_then(Value::as_object) else {
    return true;
  };

  filters.iter().all(|(field, expected)| {
    let actual = row.get(field).unwrap_or(&Value::Null);
    match expected.as_array() {
      // ["in", [..]] membership, the only operator the gateway emits
      Some(parts) if parts.first().and_then(Value::as_str) == Some("in") => parts
        .get(1)
        .and_then(Value::as_array)
        .is_some_and(|options| options.contains(actual)),
      _ => actual == expected,
    }
  })
}

fn order_rows(rows: &mut Vec<Map<String, Value>>, order_by: Option<&str>) {
  // Insertion order is creation order; only the direction matters.
  if order_by.is_some_and(|order| order.ends_with("desc")) {
    rows.reverse();
  }
}

fn project(row: &Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
  if fields.contains(&"*") {
    return row.clone();
  }
  let mut projected = Map::new();
  for field in fields {
    projected.insert(
      (*field).to_string(),
      row.get(*field).cloned().unwrap_or(Value::Null),
    );
  }
  projected
}

impl MemoryBackend {
  pub fn new() -> Self {
    let state = State {
      payment_party_details: json!({}),
      party_details: json!({}),
      party_account: Value::Null,
      outstanding: json!([]),
      item_details: json!({}),
      conversion_factor: json!({ "conversion_factor": 1.0 }),
      ..State::default()
    };
    Self {
      state: Mutex::new(state),
    }
  }

  /// Backend pre-loaded with the schemas the mobile API works against.
  pub fn with_standard_metas() -> Self {
    let backend = Self::new();
    for meta in standard_metas() {
      backend.register_meta(meta);
    }
    backend
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, State> {
    self.state.lock().expect("memory backend state poisoned")
  }

  pub fn register_meta(&self, meta: DocMeta) {
    let mut state = self.lock();
    state.metas.insert(meta.doctype.clone(), meta);
  }

  /// Store a record directly, bypassing the service path. Assigns a name
  /// when the document has none.
  pub fn seed(&self, mut doc: Document) -> String {
    let mut state = self.lock();
    state.assign_name(&mut doc);
    let name = doc.name().unwrap_or_default().to_string();
    state.docs.entry(doc.doctype().to_string()).or_default().push(doc);
    name
  }

  pub fn set_single(&self, doctype: &str, field: &str, value: Value) {
    let mut state = self.lock();
    state
      .singles
      .insert((doctype.to_string(), field.to_string()), value);
  }

  /// Make the permission checker refuse every request for `doctype`.
  pub fn deny_writes(&self, doctype: &str) {
    self.lock().denied.insert(doctype.to_string());
  }

  /// Make every subsequent insert/save fail with `message`.
  pub fn fail_writes_with(&self, message: &str) {
    self.lock().write_failure = Some(message.to_string());
  }

  pub fn set_exchange_rate(&self, rate: Decimal) {
    self.lock().exchange_rate = Some(rate);
  }

  pub fn set_payment_party_details(&self, value: Value) {
    self.lock().payment_party_details = value;
  }

  pub fn set_party_details(&self, value: Value) {
    self.lock().party_details = value;
  }

  pub fn set_party_account(&self, value: Value) {
    self.lock().party_account = value;
  }

  pub fn set_outstanding(&self, value: Value) {
    self.lock().outstanding = value;
  }

  pub fn set_item_details(&self, value: Value) {
    self.lock().item_details = value;
  }

  pub fn set_conversion_factor(&self, value: Value) {
    self.lock().conversion_factor = value;
  }

  pub fn count(&self, doctype: &str) -> usize {
    self.lock().docs.get(doctype).map(Vec::len).unwrap_or(0)
  }

  pub fn stored(&self, doctype: &str, name: &str) -> Option<Document> {
    self
      .lock()
      .docs
      .get(doctype)?
      .iter()
      .find(|doc| doc.name() == Some(name))
      .cloned()
  }

  pub fn commits(&self) -> u64 {
    self.lock().commits
  }

  pub fn error_log_entries(&self) -> Vec<(String, String)> {
    self.lock().error_log.clone()
  }
}

impl Default for MemoryBackend {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl DocumentStore for MemoryBackend {
  async fn meta(&self, doctype: &str) -> Result<DocMeta, DocStoreError> {
    self.lock().meta(doctype)
  }

  async fn get(&self, doctype: &str, name: &str) -> Result<Document, DocStoreError> {
    let state = self.lock();
    state
      .docs
      .get(doctype)
      .and_then(|docs| docs.iter().find(|doc| doc.name() == Some(name)))
      .cloned()
      .ok_or_else(|| DocStoreError::NotFound {
        doctype: doctype.to_string(),
        name: name.to_string(),
      })
  }

  async fn exists(&self, doctype: &str, name: &str) -> Result<bool, DocStoreError> {
    let state = self.lock();
    Ok(
      state
        .docs
        .get(doctype)
        .is_some_and(|docs| docs.iter().any(|doc| doc.name() == Some(name))),
    )
  }

  async fn insert(&self, mut doc: Document) -> Result<Document, DocStoreError> {
    let mut state = self.lock();
    state.fail_writes_if_poisoned()?;
    state.meta(doc.doctype())?;
    state.assign_name(&mut doc);
    state
      .docs
      .entry(doc.doctype().to_string())
      .or_default()
      .push(doc.clone());
    Ok(doc)
  }

  async fn save(&self, doc: Document) -> Result<Document, DocStoreError> {
    let mut state = self.lock();
    state.fail_writes_if_poisoned()?;

    let name = doc.name().map(str::to_string).ok_or_else(|| {
      DocStoreError::Rejected("cannot save a document without a name".to_string())
    })?;

    let docs = state
      .docs
      .get_mut(doc.doctype())
      .ok_or_else(|| DocStoreError::NotFound {
        doctype: doc.doctype().to_string(),
        name: name.clone(),
      })?;

    let slot = docs
      .iter_mut()
      .find(|existing| existing.name() == Some(name.as_str()))
      .ok_or_else(|| DocStoreError::NotFound {
        doctype: doc.doctype().to_string(),
        name: name.clone(),
      })?;

    *slot = doc.clone();
    Ok(doc)
  }

  async fn commit(&self) -> Result<(), DocStoreError> {
    self.lock().commits += 1;
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
    let state = self.lock();
    let mut rows: Vec<Map<String, Value>> = state
      .rows_of(doctype)
      .into_iter()
      .filter(|row| matches_filters(row, filters))
      .collect();
    order_rows(&mut rows, order_by);
    Ok(rows.iter().map(|row| project(row, fields)).collect())
  }

  async fn field_value(
    &self,
    doctype: &str,
    filters: &Value,
    field: &str,
    order_by: Option<&str>,
  ) -> Result<Option<Value>, DocStoreError> {
    let rows = self.query(doctype, Some(filters), &[field], order_by).await?;
    Ok(
      rows
        .into_iter()
        .next()
        .and_then(|mut row| row.remove(field))
        .filter(|value| !value.is_null()),
    )
  }

  async fn single_value(&self, doctype: &str, field: &str) -> Result<Option<Value>, DocStoreError> {
    let state = self.lock();
    Ok(
      state
        .singles
        .get(&(doctype.to_string(), field.to_string()))
        .cloned(),
    )
  }
}

#[async_trait]
impl PermissionChecker for MemoryBackend {
  async fn has_permission(
    &self,
    doctype: &str,
    _level: AccessLevel,
    _user: Option<&str>,
  ) -> Result<bool, DocStoreError> {
    Ok(!self.lock().denied.contains(doctype))
  }
}

#[async_trait]
impl DynamicLinks for MemoryBackend {
  async fn first_linked(
    &self,
    doctype: &str,
    link_doctype: &str,
    link_name: &str,
    fields: &[&str],
  ) -> Result<Option<Map<String, Value>>, DocStoreError> {
    let state = self.lock();
    let Some(docs) = state.docs.get(doctype) else {
      return Ok(None);
    };

    for doc in docs {
      let linked = doc.child_fields().any(|field| {
        doc.children(field).iter().any(|row| {
          row.get("link_doctype").and_then(Value::as_str) == Some(link_doctype)
            && row.get("link_name").and_then(Value::as_str) == Some(link_name)
        })
      });

      if linked {
        if let Value::Object(object) = doc.to_value() {
          return Ok(Some(project(&object, fields)));
        }
      }
    }
    Ok(None)
  }
}

#[async_trait]
impl ErrorLog for MemoryBackend {
  async fn record(&self, title: &str, detail: &str) {
    tracing::error!(context = title, "{detail}");
    self
      .lock()
      .error_log
      .push((title.to_string(), detail.to_string()));
  }
}

#[async_trait]
impl ExchangeRates for MemoryBackend {
  async fn rate(
    &self,
    _from_currency: &str,
    _to_currency: &str,
    _transaction_date: Option<&str>,
  ) -> Result<Decimal, LedgerError> {
    Ok(self.lock().exchange_rate.unwrap_or(Decimal::ONE))
  }
}

#[async_trait]
impl PartyResolver for MemoryBackend {
  async fn payment_party_details(
    &self,
    _company: Option<&str>,
    _party_type: &str,
    _party: &str,
    _date: &str,
    _cost_center: Option<&str>,
  ) -> Result<Value, LedgerError> {
    Ok(self.lock().payment_party_details.clone())
  }

  async fn party_details(&self, _query: PartyDetailsQuery) -> Result<Value, LedgerError> {
    Ok(self.lock().party_details.clone())
  }

  async fn party_account(
    &self,
    _party_type: &str,
    _party: &str,
    _company: &str,
  ) -> Result<Value, LedgerError> {
    Ok(self.lock().party_account.clone())
  }
}

#[async_trait]
impl OutstandingDocuments for MemoryBackend {
  async fn outstanding_for(&self, _args: Value) -> Result<Value, LedgerError> {
    Ok(self.lock().outstanding.clone())
  }
}

#[async_trait]
impl ItemLookup for MemoryBackend {
  async fn item_details(&self, _args: Value) -> Result<Value, CatalogError> {
    Ok(self.lock().item_details.clone())
  }

  async fn conversion_factor(&self, _item_code: &str, _uom: &str) -> Result<Value, CatalogError> {
    Ok(self.lock().conversion_factor.clone())
  }
}

/// Schemas of the doctypes the mobile surface touches. Only the fields the
/// endpoints read or write; the real document service owns the full set.
fn standard_metas() -> Vec<DocMeta> {
  vec![
    DocMeta::new("User").with_fields(["name", "email", "full_name", "enabled", "language"]),
    DocMeta::new("Payment Entry")
      .with_fields([
        "name",
        "owner",
        "payment_type",
        "posting_date",
        "company",
        "mode_of_payment",
        "party_type",
        "party",
        "paid_from",
        "paid_to",
        "paid_amount",
        "received_amount",
        "reference_no",
        "reference_date",
        "cost_center",
      ])
      .with_table_field("references", "Payment Entry Reference"),
    DocMeta::new("Payment Entry Reference").with_fields([
      "name",
      "reference_doctype",
      "reference_name",
      "total_amount",
      "outstanding_amount",
      "allocated_amount",
    ]),
    DocMeta::new("Sales Invoice")
      .with_fields([
        "name",
        "owner",
        "customer",
        "company",
        "posting_date",
        "due_date",
        "currency",
        "selling_price_list",
        "taxes_and_charges",
      ])
      .with_table_field("items", "Sales Invoice Item")
      .with_table_field("taxes", "Sales Taxes and Charges"),
    DocMeta::new("Sales Invoice Item").with_fields([
      "name",
      "item_code",
      "item_name",
      "qty",
      "uom",
      "rate",
      "amount",
      "warehouse",
    ]),
    DocMeta::new("Sales Taxes and Charges").with_fields([
      "name",
      "charge_type",
      "account_head",
      "description",
      "rate",
    ]),
    DocMeta::new("Purchase Invoice")
      .with_fields([
        "name",
        "owner",
        "supplier",
        "company",
        "posting_date",
        "due_date",
        "currency",
        "buying_price_list",
        "taxes_and_charges",
      ])
      .with_table_field("items", "Purchase Invoice Item")
      .with_table_field("taxes", "Purchase Taxes and Charges"),
    DocMeta::new("Purchase Invoice Item").with_fields([
      "name",
      "item_code",
      "item_name",
      "qty",
      "uom",
      "rate",
      "amount",
      "warehouse",
    ]),
    DocMeta::new("Purchase Taxes and Charges").with_fields([
      "name",
      "charge_type",
      "account_head",
      "description",
      "rate",
    ]),
    DocMeta::new("Customer").with_fields([
      "name",
      "owner",
      "customer_name",
      "customer_type",
      "mobile_no",
      "customer_group",
      "territory",
    ]),
    DocMeta::new("Customer Group").with_fields(["name"]),
    DocMeta::new("Territory").with_fields(["name"]),
    DocMeta::new("Address")
      .with_fields([
        "name",
        "address_title",
        "address_type",
        "address_line1",
        "city",
        "country",
      ])
      .with_table_field("links", "Dynamic Link"),
    DocMeta::new("Dynamic Link").with_fields(["name", "link_doctype", "link_name"]),
    DocMeta::new("Item")
      .with_fields(["name", "item_name", "item_group", "image", "standard_rate"])
      .with_table_field("barcodes", "Item Barcode"),
    DocMeta::new("Item Barcode").with_fields(["name", "barcode", "barcode_type"]),
    DocMeta::new("Account").with_fields(["name", "company", "is_group", "account_type"]),
    DocMeta::new("Mode of Payment")
      .with_fields(["name"])
      .with_table_field("accounts", "Mode of Payment Account"),
    DocMeta::new("Mode of Payment Account").with_fields(["name", "company", "default_account"]),
    DocMeta::new("Sales Taxes and Charges Template")
      .with_fields(["name", "title"])
      .with_table_field("taxes", "Sales Taxes and Charges"),
    DocMeta::new("Company").with_fields(["name", "default_currency", "country"]),
  ]
}
