use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::dtos::{
  CreateCustomerRequest, GetUserRequest, PartyAccountRequest, PartyDetailsRequest,
};
use crate::adapters::http::envelopes::StatusEnvelope;
use crate::adapters::http::errors::ApiError;
use crate::application::directory::{
  AllCustomersUseCase, CreateCustomerCommand, CreateCustomerResponse, CreateCustomerUseCase, GetUserCommand,
  GetUserUseCase, PartyAccountCommand, PartyAccountUseCase, PartyDetailsCommand, PartyDetailsUseCase,
};

/// POST /api/method/get_user
pub async fn get_user_handler(
  request: web::Json<GetUserRequest>,
  use_case: web::Data<Arc<GetUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(GetUserCommand {
      email: request.into_inner().user,
    })
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// POST /api/method/create_customer
///
/// Status-envelope endpoint: every outcome is HTTP 200, failures carry
/// `{"status": "error", "message": ...}`.
pub async fn create_customer_handler(
  request: web::Json<CreateCustomerRequest>,
  use_case: web::Data<Arc<CreateCustomerUseCase>>,
) -> HttpResponse {
  let request = request.into_inner();
  if let Err(errors) = request.validate() {
    let message = ApiError::from(errors).to_string();
    return HttpResponse::Ok().json(StatusEnvelope::<CreateCustomerResponse>::Error(message));
  }

  let envelope = match use_case
    .execute(CreateCustomerCommand {
      customer_name: request.customer_name,
      phone: request.phone,
      address_line1: request.address_line1,
      city: request.city,
      country: request.country,
    })
    .await
  {
    Ok(created) => StatusEnvelope::Success(created),
    Err(e) => StatusEnvelope::Error(e.to_string()),
  };
  HttpResponse::Ok().json(envelope)
}

/// GET|POST /api/method/get_all_customers
pub async fn all_customers_handler(use_case: web::Data<Arc<AllCustomersUseCase>>) -> HttpResponse {
  let envelope = match use_case.execute().await {
    Ok(response) => StatusEnvelope::Success(response),
    Err(e) => StatusEnvelope::Error(e.to_string()),
  };
  HttpResponse::Ok().json(envelope)
}

/// POST /api/method/get_party_details
pub async fn party_details_handler(
  request: web::Json<PartyDetailsRequest>,
  use_case: web::Data<Arc<PartyDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner();
  let details = use_case
    .execute(PartyDetailsCommand {
      party_type: request.party_type,
      party: request.party,
      posting_date: request.posting_date,
      company: request.company,
      account: request.account,
      price_list: request.price_list,
      pos_profile: request.pos_profile,
      doctype: request.doctype,
    })
    .await?;
  Ok(HttpResponse::Ok().json(details))
}

/// POST /api/method/get_party_account
pub async fn party_account_handler(
  request: web::Json<PartyAccountRequest>,
  use_case: web::Data<Arc<PartyAccountUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner();
  let account = use_case
    .execute(PartyAccountCommand {
      party_type: request.party_type,
      party: request.party,
      company: request.company,
    })
    .await?;
  Ok(HttpResponse::Ok().json(account))
}
