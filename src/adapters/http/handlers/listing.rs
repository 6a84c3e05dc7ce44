use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::dtos::{FiltersRequest, ModesOfPaymentRequest};
use crate::adapters::http::errors::ApiError;
use crate::application::listing::{
  ListNamesCommand, ListNamesUseCase, ModesOfPaymentCommand, ModesOfPaymentUseCase,
};

/// Shared handler body of every `get_<doctype>_list` route; the route
/// binds its doctype when it is registered.
pub async fn list_names(
  doctype: &str,
  request: Option<web::Json<FiltersRequest>>,
  use_case: &ListNamesUseCase,
) -> Result<HttpResponse, ApiError> {
  let filters = request.map(|r| r.into_inner().filters).unwrap_or_default();
  let response = use_case.execute(doctype, ListNamesCommand { filters }).await?;
  Ok(HttpResponse::Ok().json(response.rows))
}

/// POST /api/method/get_mode_of_payments_list
pub async fn modes_of_payment_handler(
  request: web::Json<ModesOfPaymentRequest>,
  use_case: web::Data<Arc<ModesOfPaymentUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner();
  let response = use_case
    .execute(ModesOfPaymentCommand {
      company: request.company,
      filters: request.filters,
    })
    .await?;
  Ok(HttpResponse::Ok().json(response.modes))
}
