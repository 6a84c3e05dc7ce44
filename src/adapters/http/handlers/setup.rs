use actix_web::{HttpResponse, web};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::adapters::http::dtos::ExchangeRateRequest;
use crate::adapters::http::envelopes::StatusEnvelope;
use crate::adapters::http::errors::ApiError;
use crate::application::setup::{
  CompanyCurrencyUseCase, DefaultCompanyUseCase, DefaultCountryUseCase, ExchangeRateCommand,
  ExchangeRateUseCase, TaxTemplatesUseCase,
};

/// GET|POST /api/method/get_default_company
pub async fn default_company_handler(
  use_case: web::Data<Arc<DefaultCompanyUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;
  Ok(HttpResponse::Ok().json(response))
}

/// GET|POST /api/method/get_defaults_company_currency
///
/// The client expects the two-element `[company, currency]` array, or null
/// when no default company is configured.
pub async fn company_currency_handler(
  use_case: web::Data<Arc<CompanyCurrencyUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;
  let body = match response.company {
    Some(company) => json!([company, response.currency.unwrap_or(Value::Null)]),
    None => Value::Null,
  };
  Ok(HttpResponse::Ok().json(body))
}

/// GET|POST /api/method/get_default_country
pub async fn default_country_handler(use_case: web::Data<Arc<DefaultCountryUseCase>>) -> HttpResponse {
  let envelope = match use_case.execute().await {
    Ok(response) => StatusEnvelope::Success(response),
    Err(e) => StatusEnvelope::Error(e.to_string()),
  };
  HttpResponse::Ok().json(envelope)
}

/// GET|POST /api/method/get_tax_templates
pub async fn tax_templates_handler(use_case: web::Data<Arc<TaxTemplatesUseCase>>) -> HttpResponse {
  let envelope = match use_case.execute().await {
    Ok(response) => StatusEnvelope::Success(response),
    Err(e) => StatusEnvelope::Error(e.to_string()),
  };
  HttpResponse::Ok().json(envelope)
}

/// POST /api/method/get_exchange_rate
pub async fn exchange_rate_handler(
  request: web::Json<ExchangeRateRequest>,
  use_case: web::Data<Arc<ExchangeRateUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner();
  let response = use_case
    .execute(ExchangeRateCommand {
      from_currency: request.from_currency,
      to_currency: request.to_currency,
      transaction_date: request.transaction_date,
    })
    .await?;
  Ok(HttpResponse::Ok().json(response.rate))
}
