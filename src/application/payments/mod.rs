pub mod account_options;
pub mod create_payment;
pub mod get_payment_entry;
pub mod outstanding_documents;
pub mod payment_party_details;
pub mod update_payment;

pub use account_options::{AccountOptionsCommand, AccountOptionsResponse, AccountOptionsUseCase};
pub use create_payment::{CreatePaymentCommand, CreatePaymentResponse, CreatePaymentUseCase};
pub use get_payment_entry::{GetPaymentEntryCommand, GetPaymentEntryResponse, GetPaymentEntryUseCase};
pub use outstanding_documents::{OutstandingDocumentsCommand, OutstandingDocumentsUseCase};
pub use payment_party_details::{PaymentPartyDetailsCommand, PaymentPartyDetailsUseCase};
pub use update_payment::{UpdatePaymentCommand, UpdatePaymentResponse, UpdatePaymentUseCase};
