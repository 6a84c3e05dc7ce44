pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{DocMeta, Document};
pub use errors::{DocError, DocStoreError};
pub use ports::{DocumentStore, DynamicLinks, ErrorLog, PermissionChecker};
pub use services::DocumentService;
pub use value_objects::{AccessLevel, PayloadArgs, PayloadError};
