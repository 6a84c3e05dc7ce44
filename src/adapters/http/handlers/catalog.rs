use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::dtos::{ArgsRequest, ConversionFactorRequest, FiltersRequest};
use crate::adapters::http::errors::ApiError;
use crate::application::catalog::{
  ConversionFactorCommand, ConversionFactorUseCase, ItemDetailsCommand, ItemDetailsUseCase,
  ItemsOverviewCommand, ItemsOverviewUseCase,
};

/// POST /api/method/get_items_details_list
pub async fn items_details_list_handler(
  request: Option<web::Json<FiltersRequest>>,
  use_case: web::Data<Arc<ItemsOverviewUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let filters = request.map(|r| r.into_inner().filters).unwrap_or_default();
  let response = use_case.execute(ItemsOverviewCommand { filters }).await?;
  Ok(HttpResponse::Ok().json(response.items))
}

/// POST /api/method/get_item_details
pub async fn item_details_handler(
  request: web::Json<ArgsRequest>,
  use_case: web::Data<Arc<ItemDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let details = use_case
    .execute(ItemDetailsCommand {
      args: request.into_inner().args,
    })
    .await?;
  Ok(HttpResponse::Ok().json(details))
}

/// POST /api/method/get_conversion_factor
pub async fn conversion_factor_handler(
  request: web::Json<ConversionFactorRequest>,
  use_case: web::Data<Arc<ConversionFactorUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner();
  let factor = use_case
    .execute(ConversionFactorCommand {
      item_code: request.item_code,
      uom: request.uom,
    })
    .await?;
  Ok(HttpResponse::Ok().json(factor))
}
