use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::docs::{DocError, Document, DocumentService};

#[derive(Debug, Deserialize)]
pub struct GetUserCommand {
  pub email: String,
}

#[derive(Debug, Serialize)]
pub struct GetUserResponse {
  pub user: Document,
  #[serde(rename = "type")]
  pub kind: &'static str,
}

pub struct GetUserUseCase {
  documents: Arc<DocumentService>,
}

impl GetUserUseCase {
  pub fn new(documents: Arc<DocumentService>) -> Self {
    Self { documents }
  }

  pub async fn execute(&self, command: GetUserCommand) -> Result<GetUserResponse, DocError> {
    let user = self.documents.get("User", &command.email).await?;
    Ok(GetUserResponse { user, kind: "user" })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::backend::MemoryBackend;
  use serde_json::json;

  #[tokio::test]
  async fn test_response_tags_the_record_as_a_user() {
    let backend = Arc::new(MemoryBackend::with_standard_metas());
    let mut user = Document::new("User");
    user.set_name("cashier@example.com");
    user.set("full_name", json!("Cashier One"));
    backend.seed(user);

    let use_case = GetUserUseCase::new(Arc::new(DocumentService::new(backend.clone(), backend.clone())));
    let response = use_case
      .execute(GetUserCommand {
        email: "cashier@example.com".to_string(),
      })
      .await
      .unwrap();

    let serialized = serde_json::to_value(&response).unwrap();
    assert_eq!(serialized["type"], json!("user"));
    assert_eq!(serialized["user"]["full_name"], json!("Cashier One"));
  }
}
