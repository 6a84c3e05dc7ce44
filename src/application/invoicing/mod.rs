pub mod create_invoice;
pub mod get_invoice;
pub mod update_invoice;

pub use create_invoice::{CreateInvoiceCommand, CreateInvoiceResponse, CreateInvoiceUseCase};
pub use get_invoice::{GetInvoiceCommand, GetInvoiceResponse, GetInvoiceUseCase};
pub use update_invoice::{UpdateInvoiceCommand, UpdateInvoiceResponse, UpdateInvoiceUseCase};

/// The two invoice families share the exact same endpoint behavior; only
/// the doctype and the payload key naming the record differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceKind {
  Sales,
  Purchase,
}

impl InvoiceKind {
  pub fn doctype(self) -> &'static str {
    match self {
      InvoiceKind::Sales => "Sales Invoice",
      InvoiceKind::Purchase => "Purchase Invoice",
    }
  }

  /// Payload key carrying the record name on update reads.
  pub fn key_field(self) -> &'static str {
    match self {
      InvoiceKind::Sales => "sales_invoice",
      InvoiceKind::Purchase => "purchase_invoice",
    }
  }
}
