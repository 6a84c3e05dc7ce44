use actix_web::{HttpResponse, web};
use serde_json::Value;
use std::sync::Arc;

use crate::adapters::http::dtos::{
  AccountOptionsRequest, ArgsRequest, PaymentEntryRequest, PaymentPartyDetailsRequest,
};
use crate::adapters::http::envelopes::LegacyEnvelope;
use crate::adapters::http::errors::ApiError;
use crate::application::payments::{
  AccountOptionsCommand, AccountOptionsUseCase, CreatePaymentCommand, CreatePaymentUseCase,
  GetPaymentEntryCommand, GetPaymentEntryUseCase, OutstandingDocumentsCommand, OutstandingDocumentsUseCase,
  PaymentPartyDetailsCommand, PaymentPartyDetailsUseCase, UpdatePaymentCommand, UpdatePaymentUseCase,
};

/// Distinct app-data keys for the two directions of the account picker;
/// both wrap the same use case type.
#[derive(Clone)]
pub struct PaidToAccounts(pub Arc<AccountOptionsUseCase>);
#[derive(Clone)]
pub struct PaidFromAccounts(pub Arc<AccountOptionsUseCase>);

/// Pull the `args` member out of an enveloped write request. A missing or
/// undecodable body becomes a failure envelope, never an HTTP error.
fn take_args(request: Option<web::Json<ArgsRequest>>) -> Result<Value, HttpResponse> {
  match request {
    Some(body) => Ok(body.into_inner().args),
    None => Err(HttpResponse::Ok().json(LegacyEnvelope::fail("args payload is not valid JSON"))),
  }
}

/// POST /api/method/create_payment
pub async fn create_payment_handler(
  request: Option<web::Json<ArgsRequest>>,
  use_case: web::Data<Arc<CreatePaymentUseCase>>,
) -> HttpResponse {
  let args = match take_args(request) {
    Ok(args) => args,
    Err(response) => return response,
  };

  let envelope = match use_case.execute(CreatePaymentCommand { args }).await {
    Ok(_) => LegacyEnvelope::ok(),
    Err(e) => LegacyEnvelope::fail(e.to_string()),
  };
  HttpResponse::Ok().json(envelope)
}

/// POST /api/method/update_payment
pub async fn update_payment_handler(
  request: Option<web::Json<ArgsRequest>>,
  use_case: web::Data<Arc<UpdatePaymentUseCase>>,
) -> HttpResponse {
  let args = match take_args(request) {
    Ok(args) => args,
    Err(response) => return response,
  };

  let envelope = match use_case.execute(UpdatePaymentCommand { args }).await {
    Ok(_) => LegacyEnvelope::ok(),
    Err(e) => LegacyEnvelope::fail(e.to_string()),
  };
  HttpResponse::Ok().json(envelope)
}

/// POST /api/method/get_payment_entry
pub async fn get_payment_entry_handler(
  request: web::Json<PaymentEntryRequest>,
  use_case: web::Data<Arc<GetPaymentEntryUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(GetPaymentEntryCommand {
      payment_entry: request.into_inner().payment_entry,
    })
    .await?;
  Ok(HttpResponse::Ok().json(response.entries))
}

/// POST /api/method/get_payment_party_details
pub async fn payment_party_details_handler(
  request: web::Json<PaymentPartyDetailsRequest>,
  use_case: web::Data<Arc<PaymentPartyDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner();
  let details = use_case
    .execute(PaymentPartyDetailsCommand {
      company: request.company,
      party_type: request.party_type,
      party: request.party,
      date: request.date,
      cost_center: request.cost_center,
    })
    .await?;
  Ok(HttpResponse::Ok().json(details))
}

/// POST /api/method/get_paid_to_accounts_query
pub async fn paid_to_accounts_handler(
  request: web::Json<AccountOptionsRequest>,
  use_case: web::Data<PaidToAccounts>,
) -> Result<HttpResponse, ApiError> {
  account_options(request.into_inner(), &use_case.0).await
}

/// POST /api/method/get_paid_from_accounts_query
pub async fn paid_from_accounts_handler(
  request: web::Json<AccountOptionsRequest>,
  use_case: web::Data<PaidFromAccounts>,
) -> Result<HttpResponse, ApiError> {
  account_options(request.into_inner(), &use_case.0).await
}

async fn account_options(
  request: AccountOptionsRequest,
  use_case: &AccountOptionsUseCase,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(AccountOptionsCommand {
      payment_type: request.payment_type,
      party_type: request.party_type,
      company: request.company,
    })
    .await?;
  Ok(HttpResponse::Ok().json(response.accounts))
}

/// POST /api/method/get_outstanding_documents
pub async fn outstanding_documents_handler(
  request: web::Json<ArgsRequest>,
  use_case: web::Data<Arc<OutstandingDocumentsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let documents = use_case
    .execute(OutstandingDocumentsCommand {
      args: request.into_inner().args,
    })
    .await?;
  Ok(HttpResponse::Ok().json(documents))
}
