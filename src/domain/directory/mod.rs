pub mod errors;
pub mod services;

pub use errors::DirectoryError;
pub use services::{CustomerCreated, CustomerRecord, DirectoryService, NewCustomer};
