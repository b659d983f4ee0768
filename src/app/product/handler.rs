//! 商品处理器

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::debug;

use super::{
    coerce::parse_int,
    model::{Product, ProductInput, SearchCriteria, SearchQuery},
    service::{product_not_found, ProductService},
};
use crate::core::{error::CoreError, extract::JsonOrForm, response::ApiResponse};

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

/// 路径中的 id 按整数前缀解析，无法解析时视为不存在
fn parse_id(raw: &str) -> Result<i64, CoreError> {
    parse_int(raw).ok_or_else(product_not_found)
}

pub async fn list_products(State(state): State<AppState>) -> Json<ApiResponse<Vec<Product>>> {
    Json(ApiResponse::success(state.product_service.list_products()))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, CoreError> {
    let product = state.product_service.get_product(parse_id(&id)?)?;
    Ok(Json(ApiResponse::success(product)))
}

pub async fn search_products(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Product>>>, CoreError> {
    let Query(query) = query?;
    debug!("搜索参数: {:?}", query);

    let criteria = SearchCriteria::from(query);
    let products = state.product_service.search_products(&criteria)?;
    Ok(Json(ApiResponse::success(products)))
}

pub async fn create_product(
    State(state): State<AppState>,
    JsonOrForm(input): JsonOrForm<ProductInput>,
) -> (StatusCode, Json<ApiResponse<Product>>) {
    let product = state.product_service.create_product(input);
    (
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Product added", product)),
    )
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonOrForm(input): JsonOrForm<ProductInput>,
) -> Result<Json<ApiResponse<Product>>, CoreError> {
    let product = state.product_service.update_product(parse_id(&id)?, input)?;
    Ok(Json(ApiResponse::with_message("Product updated", product)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, CoreError> {
    state.product_service.delete_product(parse_id(&id)?)?;
    Ok(Json(ApiResponse::message("Product deleted")))
}

/// `/api/products/search` 上的 PUT/DELETE：`search` 不是合法 id，按不存在处理
pub async fn search_segment_as_id() -> CoreError {
    product_not_found()
}
