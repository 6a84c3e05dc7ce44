pub mod dtos;
pub mod envelopes;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::invoicing::{PurchaseInvoices, SalesInvoices};
pub use handlers::payments::{PaidFromAccounts, PaidToAccounts};
pub use middleware::{RequestId, RequestIdMiddleware};
pub use routes::{
  configure_catalog_routes, configure_directory_routes, configure_invoice_routes,
  configure_listing_routes, configure_payment_routes, configure_setup_routes,
};
