use actix_web::web;
use std::sync::Arc;

use crate::application::catalog::{ConversionFactorUseCase, ItemDetailsUseCase, ItemsOverviewUseCase};
use crate::application::directory::{
  AllCustomersUseCase, CreateCustomerUseCase, GetUserUseCase, PartyAccountUseCase, PartyDetailsUseCase,
};
use crate::application::listing::{ListNamesUseCase, ModesOfPaymentUseCase};
use crate::application::payments::{
  CreatePaymentUseCase, GetPaymentEntryUseCase, OutstandingDocumentsUseCase, PaymentPartyDetailsUseCase,
  UpdatePaymentUseCase,
};
use crate::application::setup::{
  CompanyCurrencyUseCase, DefaultCompanyUseCase, DefaultCountryUseCase, ExchangeRateUseCase,
  TaxTemplatesUseCase,
};

use super::dtos::FiltersRequest;
use super::handlers::invoicing::{
  PurchaseInvoices, SalesInvoices, create_purchase_invoice_handler, create_sales_invoice_handler,
  get_purchase_invoice_handler, get_sales_invoice_handler, update_purchase_invoice_handler,
  update_sales_invoice_handler,
};
use super::handlers::payments::{PaidFromAccounts, PaidToAccounts};
use super::handlers::{catalog, directory, listing, payments, setup};

/// Every `get_<doctype>_list` route and the doctype it queries. All of them
/// run through the one generic name-listing use case.
const NAME_LIST_ROUTES: &[(&str, &str)] = &[
  ("get_items_list", "Item"),
  ("get_payment_entries_list", "Payment Entry"),
  ("get_sales_invoices_list", "Sales Invoice"),
  ("get_purchase_invoices_list", "Purchase Invoice"),
  ("get_bank_accounts_list", "Bank Account"),
  ("get_accounts_list", "Account"),
  ("get_employees_list", "Employee"),
  ("get_suppliers_list", "Supplier"),
  ("get_shareholders_list", "Shareholder"),
  ("get_customers_list", "Customer"),
  ("get_currencies_list", "Currency"),
  ("get_price_lists_list", "Price List"),
  ("get_uoms_list", "UOM"),
  ("get_sales_persons_list", "Sales Person"),
  ("get_sales_taxes_templates_list", "Sales Taxes and Charges Template"),
  ("get_purchase_taxes_templates_list", "Purchase Taxes and Charges Template"),
  ("get_addresses_list", "Address"),
  ("get_contacts_list", "Contact"),
  ("get_payment_terms_templates_list", "Payment Terms Template"),
  ("get_payment_terms_list", "Payment Term"),
  ("get_terms_and_conditions_list", "Terms and Conditions"),
  ("get_cost_centers_list", "Cost Center"),
  ("get_projects_list", "Project"),
  ("get_warehouses", "Warehouse"),
];

/// Configure payment entry routes
pub fn configure_payment_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreatePaymentUseCase>,
  update_use_case: Arc<UpdatePaymentUseCase>,
  get_use_case: Arc<GetPaymentEntryUseCase>,
  party_details_use_case: Arc<PaymentPartyDetailsUseCase>,
  paid_to: PaidToAccounts,
  paid_from: PaidFromAccounts,
  outstanding_use_case: Arc<OutstandingDocumentsUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(update_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(party_details_use_case))
    .app_data(web::Data::new(paid_to))
    .app_data(web::Data::new(paid_from))
    .app_data(web::Data::new(outstanding_use_case))
    .route("create_payment", web::post().to(payments::create_payment_handler))
    .route("update_payment", web::post().to(payments::update_payment_handler))
    .route("get_payment_entry", web::post().to(payments::get_payment_entry_handler))
    .route(
      "get_payment_party_details",
      web::post().to(payments::payment_party_details_handler),
    )
    .route(
      "get_paid_to_accounts_query",
      web::post().to(payments::paid_to_accounts_handler),
    )
    .route(
      "get_paid_from_accounts_query",
      web::post().to(payments::paid_from_accounts_handler),
    )
    .route(
      "get_outstanding_documents",
      web::post().to(payments::outstanding_documents_handler),
    );
}

/// Configure sales and purchase invoice routes
pub fn configure_invoice_routes(
  cfg: &mut web::ServiceConfig,
  sales: SalesInvoices,
  purchase: PurchaseInvoices,
) {
  cfg
    .app_data(web::Data::new(sales))
    .app_data(web::Data::new(purchase))
    .route("create_sales_invoice", web::post().to(create_sales_invoice_handler))
    .route("update_sales_invoice", web::post().to(update_sales_invoice_handler))
    .route("get_sales_invoice", web::post().to(get_sales_invoice_handler))
    .route(
      "create_purchase_invoice",
      web::post().to(create_purchase_invoice_handler),
    )
    .route(
      "update_purchase_invoice",
      web::post().to(update_purchase_invoice_handler),
    )
    .route("get_purchase_invoice", web::post().to(get_purchase_invoice_handler));
}

/// Configure item catalog routes
pub fn configure_catalog_routes(
  cfg: &mut web::ServiceConfig,
  items_overview_use_case: Arc<ItemsOverviewUseCase>,
  item_details_use_case: Arc<ItemDetailsUseCase>,
  conversion_factor_use_case: Arc<ConversionFactorUseCase>,
) {
  cfg
    .app_data(web::Data::new(items_overview_use_case))
    .app_data(web::Data::new(item_details_use_case))
    .app_data(web::Data::new(conversion_factor_use_case))
    .route(
      "get_items_details_list",
      web::post().to(catalog::items_details_list_handler),
    )
    .route("get_item_details", web::post().to(catalog::item_details_handler))
    .route(
      "get_conversion_factor",
      web::post().to(catalog::conversion_factor_handler),
    );
}

/// Configure customer directory and party routes
pub fn configure_directory_routes(
  cfg: &mut web::ServiceConfig,
  get_user_use_case: Arc<GetUserUseCase>,
  create_customer_use_case: Arc<CreateCustomerUseCase>,
  all_customers_use_case: Arc<AllCustomersUseCase>,
  party_details_use_case: Arc<PartyDetailsUseCase>,
  party_account_use_case: Arc<PartyAccountUseCase>,
) {
  cfg
    .app_data(web::Data::new(get_user_use_case))
    .app_data(web::Data::new(create_customer_use_case))
    .app_data(web::Data::new(all_customers_use_case))
    .app_data(web::Data::new(party_details_use_case))
    .app_data(web::Data::new(party_account_use_case))
    .route("get_user", web::post().to(directory::get_user_handler))
    .route("create_customer", web::post().to(directory::create_customer_handler))
    .route("get_all_customers", web::get().to(directory::all_customers_handler))
    .route("get_all_customers", web::post().to(directory::all_customers_handler))
    .route("get_party_details", web::post().to(directory::party_details_handler))
    .route("get_party_account", web::post().to(directory::party_account_handler));
}

/// Configure the generic name-listing routes and the mode of payment join
pub fn configure_listing_routes(
  cfg: &mut web::ServiceConfig,
  list_use_case: Arc<ListNamesUseCase>,
  modes_use_case: Arc<ModesOfPaymentUseCase>,
) {
  cfg
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(modes_use_case))
    .route(
      "get_mode_of_payments_list",
      web::post().to(listing::modes_of_payment_handler),
    );

  for (path, doctype) in NAME_LIST_ROUTES {
    let handler =
      move |request: Option<web::Json<FiltersRequest>>, use_case: web::Data<Arc<ListNamesUseCase>>| async move {
        listing::list_names(doctype, request, &use_case).await
      };
    cfg.route(path, web::post().to(handler));
    cfg.route(path, web::get().to(handler));
  }
}

/// Configure company default, exchange rate and tax template routes
pub fn configure_setup_routes(
  cfg: &mut web::ServiceConfig,
  default_company_use_case: Arc<DefaultCompanyUseCase>,
  company_currency_use_case: Arc<CompanyCurrencyUseCase>,
  default_country_use_case: Arc<DefaultCountryUseCase>,
  exchange_rate_use_case: Arc<ExchangeRateUseCase>,
  tax_templates_use_case: Arc<TaxTemplatesUseCase>,
) {
  cfg
    .app_data(web::Data::new(default_company_use_case))
    .app_data(web::Data::new(company_currency_use_case))
    .app_data(web::Data::new(default_country_use_case))
    .app_data(web::Data::new(exchange_rate_use_case))
    .app_data(web::Data::new(tax_templates_use_case))
    .route("get_default_company", web::get().to(setup::default_company_handler))
    .route("get_default_company", web::post().to(setup::default_company_handler))
    .route(
      "get_defaults_company_currency",
      web::get().to(setup::company_currency_handler),
    )
    .route(
      "get_defaults_company_currency",
      web::post().to(setup::company_currency_handler),
    )
    .route("get_default_country", web::get().to(setup::default_country_handler))
    .route("get_default_country", web::post().to(setup::default_country_handler))
    .route("get_tax_templates", web::get().to(setup::tax_templates_handler))
    .route("get_tax_templates", web::post().to(setup::tax_templates_handler))
    .route("get_exchange_rate", web::post().to(setup::exchange_rate_handler));
}
