pub mod catalog;
pub mod directory;
pub mod docs;
pub mod ledger;
