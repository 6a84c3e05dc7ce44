use actix_web::{App, HttpServer, middleware::Logger, web};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use erpgate::{
  adapters::http::{
    PaidFromAccounts, PaidToAccounts, PurchaseInvoices, RequestIdMiddleware, SalesInvoices,
    configure_catalog_routes, configure_directory_routes, configure_invoice_routes,
    configure_listing_routes, configure_payment_routes, configure_setup_routes,
  },
  application::catalog::{ConversionFactorUseCase, ItemDetailsUseCase, ItemsOverviewUseCase},
  application::directory::{
    AllCustomersUseCase, CreateCustomerUseCase, GetUserUseCase, PartyAccountUseCase,
    PartyDetailsUseCase,
  },
  application::invoicing::{
    CreateInvoiceUseCase, GetInvoiceUseCase, InvoiceKind, UpdateInvoiceUseCase,
  },
  application::listing::{ListNamesUseCase, ModesOfPaymentUseCase},
  application::payments::{
    AccountOptionsUseCase, CreatePaymentUseCase, GetPaymentEntryUseCase,
    OutstandingDocumentsUseCase, PaymentPartyDetailsUseCase, UpdatePaymentUseCase,
  },
  application::setup::{
    CompanyCurrencyUseCase, DefaultCompanyUseCase, DefaultCountryUseCase, ExchangeRateUseCase,
    TaxTemplatesUseCase,
  },
  domain::catalog::CatalogService,
  domain::directory::DirectoryService,
  domain::docs::DocumentService,
  domain::ledger::{LedgerService, PaymentDirection},
  infrastructure::backend::BackendHandles,
  infrastructure::config::{BackendMode, Config},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "erpgate=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting ERPGate gateway");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Select the document backend
  let backend = match config.backend.mode {
    BackendMode::Rest => {
      tracing::info!("Using REST backend at {}", config.backend.url);
      BackendHandles::rest(&config.backend).map_err(|e| {
        tracing::error!("Failed to set up REST backend: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
      })?
    }
    BackendMode::Memory => {
      tracing::warn!("Using in-memory backend; data is not persisted");
      BackendHandles::memory()
    }
  };

  // Initialize domain services
  let document_service = Arc::new(DocumentService::new(
    backend.store.clone(),
    backend.permissions.clone(),
  ));
  let ledger_service = Arc::new(LedgerService::new(
    backend.store.clone(),
    backend.exchange_rates.clone(),
    backend.parties.clone(),
    backend.outstanding.clone(),
  ));
  let directory_service = Arc::new(DirectoryService::new(
    backend.store.clone(),
    backend.links.clone(),
  ));
  let catalog_service = Arc::new(CatalogService::new(
    backend.store.clone(),
    backend.items.clone(),
  ));

  // Initialize payment use cases
  let create_payment_use_case = Arc::new(CreatePaymentUseCase::new(document_service.clone()));
  let update_payment_use_case = Arc::new(UpdatePaymentUseCase::new(document_service.clone()));
  let get_payment_entry_use_case = Arc::new(GetPaymentEntryUseCase::new(document_service.clone()));
  let payment_party_details_use_case =
    Arc::new(PaymentPartyDetailsUseCase::new(ledger_service.clone()));
  let paid_to_accounts = PaidToAccounts(Arc::new(AccountOptionsUseCase::new(
    ledger_service.clone(),
    PaymentDirection::PaidTo,
  )));
  let paid_from_accounts = PaidFromAccounts(Arc::new(AccountOptionsUseCase::new(
    ledger_service.clone(),
    PaymentDirection::PaidFrom,
  )));
  let outstanding_use_case = Arc::new(OutstandingDocumentsUseCase::new(ledger_service.clone()));

  // Initialize invoice use cases
  let sales_invoices = SalesInvoices {
    create: Arc::new(CreateInvoiceUseCase::new(
      document_service.clone(),
      InvoiceKind::Sales,
    )),
    update: Arc::new(UpdateInvoiceUseCase::new(
      document_service.clone(),
      InvoiceKind::Sales,
    )),
    get: Arc::new(GetInvoiceUseCase::new(
      document_service.clone(),
      InvoiceKind::Sales,
    )),
  };
  let purchase_invoices = PurchaseInvoices {
    create: Arc::new(CreateInvoiceUseCase::new(
      document_service.clone(),
      InvoiceKind::Purchase,
    )),
    update: Arc::new(UpdateInvoiceUseCase::new(
      document_service.clone(),
      InvoiceKind::Purchase,
    )),
    get: Arc::new(GetInvoiceUseCase::new(
      document_service.clone(),
      InvoiceKind::Purchase,
    )),
  };

  // Initialize catalog use cases
  let items_overview_use_case = Arc::new(ItemsOverviewUseCase::new(catalog_service.clone()));
  let item_details_use_case = Arc::new(ItemDetailsUseCase::new(catalog_service.clone()));
  let conversion_factor_use_case = Arc::new(ConversionFactorUseCase::new(catalog_service.clone()));

  // Initialize directory use cases
  let get_user_use_case = Arc::new(GetUserUseCase::new(document_service.clone()));
  let create_customer_use_case = Arc::new(CreateCustomerUseCase::new(
    directory_service.clone(),
    backend.error_log.clone(),
  ));
  let all_customers_use_case = Arc::new(AllCustomersUseCase::new(
    directory_service.clone(),
    backend.error_log.clone(),
  ));
  let party_details_use_case = Arc::new(PartyDetailsUseCase::new(ledger_service.clone()));
  let party_account_use_case = Arc::new(PartyAccountUseCase::new(ledger_service.clone()));

  // Initialize listing use cases
  let list_names_use_case = Arc::new(ListNamesUseCase::new(document_service.clone()));
  let modes_of_payment_use_case = Arc::new(ModesOfPaymentUseCase::new(ledger_service.clone()));

  // Initialize setup use cases
  let default_company_use_case = Arc::new(DefaultCompanyUseCase::new(ledger_service.clone()));
  let company_currency_use_case = Arc::new(CompanyCurrencyUseCase::new(ledger_service.clone()));
  let default_country_use_case = Arc::new(DefaultCountryUseCase::new(
    ledger_service.clone(),
    backend.error_log.clone(),
  ));
  let exchange_rate_use_case = Arc::new(ExchangeRateUseCase::new(ledger_service.clone()));
  let tax_templates_use_case = Arc::new(TaxTemplatesUseCase::new(
    ledger_service.clone(),
    backend.error_log.clone(),
  ));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      // Whitelisted method routes, all under the one scope the client expects
      .service(
        web::scope("/api/method")
          .configure(|cfg| {
            configure_payment_routes(
              cfg,
              create_payment_use_case.clone(),
              update_payment_use_case.clone(),
              get_payment_entry_use_case.clone(),
              payment_party_details_use_case.clone(),
              paid_to_accounts.clone(),
              paid_from_accounts.clone(),
              outstanding_use_case.clone(),
            )
          })
          .configure(|cfg| {
            configure_invoice_routes(
              cfg,
              sales_invoices.clone(),
              purchase_invoices.clone(),
            )
          })
          .configure(|cfg| {
            configure_catalog_routes(
              cfg,
              items_overview_use_case.clone(),
              item_details_use_case.clone(),
              conversion_factor_use_case.clone(),
            )
          })
          .configure(|cfg| {
            configure_directory_routes(
              cfg,
              get_user_use_case.clone(),
              create_customer_use_case.clone(),
              all_customers_use_case.clone(),
              party_details_use_case.clone(),
              party_account_use_case.clone(),
            )
          })
          .configure(|cfg| {
            configure_listing_routes(
              cfg,
              list_names_use_case.clone(),
              modes_of_payment_use_case.clone(),
            )
          })
          .configure(|cfg| {
            configure_setup_routes(
              cfg,
              default_company_use_case.clone(),
              company_currency_use_case.clone(),
              default_country_use_case.clone(),
              exchange_rate_use_case.clone(),
              tax_templates_use_case.clone(),
            )
          }),
      )
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
