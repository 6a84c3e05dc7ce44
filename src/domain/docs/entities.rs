use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A business record held by the external document service.
///
/// The gateway never defines record schemas; a `Document` is just a doctype
/// plus whatever scalar fields and child-row collections the service (or an
/// incoming payload) put on it. Child rows are kept in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
  doctype: String,
  fields: Map<String, Value>,
  children: BTreeMap<String, Vec<Document>>,
}

impl Document {
  pub fn new(doctype: impl Into<String>) -> Self {
    Self {
      doctype: doctype.into(),
      fields: Map::new(),
      children: BTreeMap::new(),
    }
  }

  pub fn doctype(&self) -> &str {
    &self.doctype
  }

  /// The record's primary key, when already assigned by the service.
  pub fn name(&self) -> Option<&str> {
    self.fields.get("name").and_then(Value::as_str)
  }

  pub fn set_name(&mut self, name: impl Into<String>) {
    self.fields.insert("name".to_string(), Value::String(name.into()));
  }

  pub fn get(&self, field: &str) -> Option<&Value> {
    self.fields.get(field)
  }

  pub fn set(&mut self, field: impl Into<String>, value: Value) {
    self.fields.insert(field.into(), value);
  }

  /// Whether a field carries a non-empty value, with the empty-ish values
  /// the wire protocol treats as unset (null, "", 0, false) counting as
  /// absent.
  pub fn is_set(&self, field: &str) -> bool {
    match self.fields.get(field) {
      None | Some(Value::Null) => false,
      Some(Value::Bool(b)) => *b,
      Some(Value::String(s)) => !s.is_empty(),
      Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
      Some(_) => true,
    }
  }

  pub fn append_child(&mut self, field: impl Into<String>, child: Document) {
    self.children.entry(field.into()).or_default().push(child);
  }

  /// Drop a sub-table's rows; a payload carrying the field replaces the
  /// collection, it never extends it.
  pub fn clear_children(&mut self, field: &str) {
    self.children.remove(field);
  }

  pub fn children(&self, field: &str) -> &[Document] {
    self.children.get(field).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn child_fields(&self) -> impl Iterator<Item = &str> {
    self.children.keys().map(String::as_str)
  }

  /// Flat JSON object: scalar fields plus child collections as arrays.
  pub fn to_value(&self) -> Value {
    let mut object = self.fields.clone();
    for (field, rows) in &self.children {
      let rows = rows.iter().map(Document::to_value).collect();
      object.insert(field.clone(), Value::Array(rows));
    }
    Value::Object(object)
  }

  /// Rebuild a document from the flat object shape, splitting child rows
  /// out of the declared sub-table fields.
  pub fn from_object(doctype: impl Into<String>, object: Map<String, Value>, meta: &DocMeta) -> Self {
    let mut doc = Document::new(doctype);
    for (field, value) in object {
      match (meta.child_doctype(&field), value) {
        (Some(child_doctype), Value::Array(rows)) => {
          for row in rows {
            if let Value::Object(attrs) = row {
              let child_meta = DocMeta::untyped(child_doctype);
              doc.append_child(field.clone(), Document::from_object(child_doctype, attrs, &child_meta));
            }
          }
        }
        (_, value) => doc.set(field, value),
      }
    }
    doc
  }
}

impl Serialize for Document {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.to_value().serialize(serializer)
  }
}

/// Schema descriptor for one doctype: which scalar fields it declares and
/// which fields are sub-tables (and of what child doctype).
///
/// Field application is allow-listed against this; payload keys the schema
/// does not declare are dropped instead of probed dynamically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocMeta {
  pub doctype: String,
  #[serde(default)]
  fields: BTreeSet<String>,
  #[serde(default)]
  table_fields: BTreeMap<String, String>,
}

impl DocMeta {
  pub fn new(doctype: impl Into<String>) -> Self {
    Self {
      doctype: doctype.into(),
      fields: BTreeSet::new(),
      table_fields: BTreeMap::new(),
    }
  }

  /// A meta that declares nothing; used when rebuilding child rows whose
  /// schema is not needed.
  fn untyped(doctype: &str) -> Self {
    Self::new(doctype)
  }

  pub fn with_fields<I, S>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.fields.extend(fields.into_iter().map(Into::into));
    self
  }

  pub fn with_table_field(mut self, field: impl Into<String>, child_doctype: impl Into<String>) -> Self {
    self.table_fields.insert(field.into(), child_doctype.into());
    self
  }

  pub fn has_field(&self, field: &str) -> bool {
    self.fields.contains(field)
  }

  pub fn child_doctype(&self, field: &str) -> Option<&str> {
    self.table_fields.get(field).map(String::as_str)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_is_set_treats_empty_values_as_unset() {
    let mut doc = Document::new("Payment Entry");
    assert!(!doc.is_set("received_amount"));

    doc.set("received_amount", json!(0));
    assert!(!doc.is_set("received_amount"));

    doc.set("received_amount", json!(null));
    assert!(!doc.is_set("received_amount"));

    doc.set("reference_no", json!(""));
    assert!(!doc.is_set("reference_no"));

    doc.set("received_amount", json!(150.0));
    assert!(doc.is_set("received_amount"));
  }

  #[test]
  fn test_fields_serialize_in_insertion_order() {
    let mut doc = Document::new("Customer");
    doc.set("territory", json!("All Territories"));
    doc.set("customer_name", json!("Jamal Trading"));

    let serialized = serde_json::to_string(&doc).unwrap();
    let territory = serialized.find("territory").unwrap();
    let customer_name = serialized.find("customer_name").unwrap();
    assert!(territory < customer_name);
  }

  #[test]
  fn test_document_serializes_children_as_arrays() {
    let mut doc = Document::new("Sales Invoice");
    doc.set("customer", json!("CUST-0001"));

    let mut row = Document::new("Sales Invoice Item");
    row.set("item_code", json!("WIDGET"));
    row.set("qty", json!(2));
    doc.append_child("items", row);

    assert_eq!(
      doc.to_value(),
      json!({
        "customer": "CUST-0001",
        "items": [{"item_code": "WIDGET", "qty": 2}]
      })
    );
  }

  #[test]
  fn test_from_object_splits_declared_sub_tables() {
    let meta = DocMeta::new("Sales Invoice")
      .with_fields(["name", "customer"])
      .with_table_field("items", "Sales Invoice Item");

    let object = json!({
      "name": "SINV-0001",
      "customer": "CUST-0001",
      "items": [{"item_code": "WIDGET"}]
    });
    let Value::Object(object) = object else { unreachable!() };

    let doc = Document::from_object("Sales Invoice", object, &meta);
    assert_eq!(doc.name(), Some("SINV-0001"));
    assert_eq!(doc.children("items").len(), 1);
    assert_eq!(doc.children("items")[0].get("item_code"), Some(&json!("WIDGET")));
  }

  #[test]
  fn test_doc_meta_lookup() {
    let meta = DocMeta::new("Payment Entry")
      .with_fields(["paid_amount", "received_amount"])
      .with_table_field("references", "Payment Entry Reference");

    assert!(meta.has_field("paid_amount"));
    assert!(!meta.has_field("references"));
    assert_eq!(meta.child_doctype("references"), Some("Payment Entry Reference"));
    assert_eq!(meta.child_doctype("paid_amount"), None);
  }
}
