pub mod errors;
pub mod ports;
pub mod services;

pub use errors::CatalogError;
pub use ports::ItemLookup;
pub use services::{CatalogService, ItemOverview};
