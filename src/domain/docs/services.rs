use std::sync::Arc;

use serde_json::{Map, Value, json};

use super::entities::{DocMeta, Document};
use super::errors::DocError;
use super::ports::{DocumentStore, PermissionChecker};
use super::value_objects::{AccessLevel, PayloadArgs};

/// The one repeating interaction pattern behind every write endpoint:
/// authorize, build the record from an allow-listed payload, persist,
/// commit. Reads pass filters straight through to the store.
pub struct DocumentService {
  store: Arc<dyn DocumentStore>,
  permissions: Arc<dyn PermissionChecker>,
}

impl DocumentService {
  pub fn new(store: Arc<dyn DocumentStore>, permissions: Arc<dyn PermissionChecker>) -> Self {
    Self { store, permissions }
  }

  /// Authorize a write and build a new document from the payload. The
  /// caller may apply business defaults before committing.
  pub async fn stage_new(&self, doctype: &str, args: &PayloadArgs) -> Result<Document, DocError> {
    self.authorize_write(doctype, args).await?;

    let meta = self.store.meta(doctype).await?;
    let mut doc = Document::new(doctype);
    self.apply(&mut doc, &meta, args, None).await?;
    Ok(doc)
  }

  pub async fn commit_new(&self, doc: Document) -> Result<Document, DocError> {
    let doc = self.store.insert(doc).await?;
    self.store.commit().await?;
    Ok(doc)
  }

  /// Authorize a write, load the record named by `key_field` and apply the
  /// payload's declared fields onto it (the key field itself is skipped).
  pub async fn stage_update(
    &self,
    doctype: &str,
    key_field: &str,
    args: &PayloadArgs,
  ) -> Result<Document, DocError> {
    self.authorize_write(doctype, args).await?;

    let name = args
      .non_empty_str(key_field)
      .ok_or_else(|| DocError::MissingName(doctype.to_string()))?;

    if !self.store.exists(doctype, name).await? {
      return Err(DocError::UnknownRecord {
        doctype: doctype.to_string(),
        name: name.to_string(),
      });
    }

    let mut doc = self.store.get(doctype, name).await?;
    let meta = self.store.meta(doctype).await?;
    self.apply(&mut doc, &meta, args, Some(key_field)).await?;
    Ok(doc)
  }

  pub async fn commit_update(&self, doc: Document) -> Result<Document, DocError> {
    let doc = self.store.save(doc).await?;
    self.store.commit().await?;
    Ok(doc)
  }

  pub async fn get(&self, doctype: &str, name: &str) -> Result<Document, DocError> {
    Ok(self.store.get(doctype, name).await?)
  }

  /// Full-fieldset rows for a named record; empty when the record is absent.
  pub async fn fetch_rows(&self, doctype: &str, name: &str) -> Result<Vec<Map<String, Value>>, DocError> {
    let filters = json!({ "name": name });
    Ok(self.store.query(doctype, Some(&filters), &["*"], None).await?)
  }

  pub async fn names(&self, doctype: &str, filters: Option<&Value>) -> Result<Vec<String>, DocError> {
    Ok(self.store.list_names(doctype, filters).await?)
  }

  async fn authorize_write(&self, doctype: &str, args: &PayloadArgs) -> Result<(), DocError> {
    let actor = args.str("owner");
    let permitted = self
      .permissions
      .has_permission(doctype, AccessLevel::Write, actor)
      .await?;
    if !permitted {
      return Err(DocError::NotPermitted);
    }
    Ok(())
  }

  /// Copy payload fields onto `doc`, allow-listed against the schema:
  /// a declared sub-table field takes a list of child payloads replacing
  /// the field's existing rows (each child's declared attributes copied
  /// onto a new child row, in input order); declared scalars are set;
  /// anything else is dropped.
  async fn apply(
    &self,
    doc: &mut Document,
    meta: &DocMeta,
    args: &PayloadArgs,
    skip: Option<&str>,
  ) -> Result<(), DocError> {
    for (field, value) in args.iter() {
      if skip == Some(field.as_str()) {
        continue;
      }

      if let Some(child_doctype) = meta.child_doctype(field) {
        let child_meta = self.store.meta(child_doctype).await?;
        let Some(rows) = value.as_array() else { continue };

        doc.clear_children(field);
        for row in rows {
          let mut child = Document::new(child_doctype);
          if let Some(attrs) = row.as_object() {
            for (attr, attr_value) in attrs {
              if child_meta.has_field(attr) {
                child.set(attr, attr_value.clone());
              }
            }
          }
          doc.append_child(field.clone(), child);
        }
      } else if meta.has_field(field) {
        doc.set(field.clone(), value.clone());
      }
    }
    Ok(())
  }
}
