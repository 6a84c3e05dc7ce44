use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::dtos::{ArgsRequest, PurchaseInvoiceRequest, SalesInvoiceRequest};
use crate::adapters::http::envelopes::LegacyEnvelope;
use crate::adapters::http::errors::ApiError;
use crate::application::invoicing::{
  CreateInvoiceCommand, CreateInvoiceUseCase, GetInvoiceCommand, GetInvoiceUseCase, UpdateInvoiceCommand,
  UpdateInvoiceUseCase,
};

/// The sales and purchase routes share use case types; the wrappers keep
/// their app-data entries apart.
#[derive(Clone)]
pub struct SalesInvoices {
  pub create: Arc<CreateInvoiceUseCase>,
  pub update: Arc<UpdateInvoiceUseCase>,
  pub get: Arc<GetInvoiceUseCase>,
}

#[derive(Clone)]
pub struct PurchaseInvoices {
  pub create: Arc<CreateInvoiceUseCase>,
  pub update: Arc<UpdateInvoiceUseCase>,
  pub get: Arc<GetInvoiceUseCase>,
}

async fn create(request: Option<web::Json<ArgsRequest>>, use_case: &CreateInvoiceUseCase) -> HttpResponse {
  let Some(body) = request else {
    return HttpResponse::Ok().json(LegacyEnvelope::fail("args payload is not valid JSON"));
  };

  let envelope = match use_case
    .execute(CreateInvoiceCommand {
      args: body.into_inner().args,
    })
    .await
  {
    Ok(_) => LegacyEnvelope::ok(),
    Err(e) => LegacyEnvelope::fail(e.to_string()),
  };
  HttpResponse::Ok().json(envelope)
}

async fn update(request: Option<web::Json<ArgsRequest>>, use_case: &UpdateInvoiceUseCase) -> HttpResponse {
  let Some(body) = request else {
    return HttpResponse::Ok().json(LegacyEnvelope::fail("args payload is not valid JSON"));
  };

  let envelope = match use_case
    .execute(UpdateInvoiceCommand {
      args: body.into_inner().args,
    })
    .await
  {
    Ok(_) => LegacyEnvelope::ok(),
    Err(e) => LegacyEnvelope::fail(e.to_string()),
  };
  HttpResponse::Ok().json(envelope)
}

async fn get(name: String, use_case: &GetInvoiceUseCase) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute(GetInvoiceCommand { name }).await?;
  Ok(HttpResponse::Ok().json(response.invoices))
}

/// POST /api/method/create_sales_invoice
pub async fn create_sales_invoice_handler(
  request: Option<web::Json<ArgsRequest>>,
  use_cases: web::Data<SalesInvoices>,
) -> HttpResponse {
  create(request, &use_cases.create).await
}

/// POST /api/method/update_sales_invoice
pub async fn update_sales_invoice_handler(
  request: Option<web::Json<ArgsRequest>>,
  use_cases: web::Data<SalesInvoices>,
) -> HttpResponse {
  update(request, &use_cases.update).await
}

/// POST /api/method/get_sales_invoice
pub async fn get_sales_invoice_handler(
  request: web::Json<SalesInvoiceRequest>,
  use_cases: web::Data<SalesInvoices>,
) -> Result<HttpResponse, ApiError> {
  get(request.into_inner().sales_invoice, &use_cases.get).await
}

/// POST /api/method/create_purchase_invoice
pub async fn create_purchase_invoice_handler(
  request: Option<web::Json<ArgsRequest>>,
  use_cases: web::Data<PurchaseInvoices>,
) -> HttpResponse {
  create(request, &use_cases.create).await
}

/// POST /api/method/update_purchase_invoice
pub async fn update_purchase_invoice_handler(
  request: Option<web::Json<ArgsRequest>>,
  use_cases: web::Data<PurchaseInvoices>,
) -> HttpResponse {
  update(request, &use_cases.update).await
}

/// POST /api/method/get_purchase_invoice
pub async fn get_purchase_invoice_handler(
  request: web::Json<PurchaseInvoiceRequest>,
  use_cases: web::Data<PurchaseInvoices>,
) -> Result<HttpResponse, ApiError> {
  get(request.into_inner().purchase_invoice, &use_cases.get).await
}
