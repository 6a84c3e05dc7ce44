pub mod catalog;
pub mod directory;
pub mod invoicing;
pub mod listing;
pub mod payments;
pub mod setup;
