pub mod errors;
pub mod ports;
pub mod services;

pub use errors::LedgerError;
pub use ports::{ExchangeRates, OutstandingDocuments, PartyDetailsQuery, PartyResolver};
pub use services::{LedgerService, ModeOfPayment, PaymentDirection, TaxCharge, TaxTemplate};
