//! HTTP 路由定义

use axum::{middleware, routing::get, Router};
use std::path::Path;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::warn;

use super::product::handler::{
    create_product, delete_product, get_product, list_products, search_products,
    search_segment_as_id, update_product, AppState,
};
use crate::core::middleware::request_logging_middleware;

/// 创建完整路由：商品 API，其余路径交给静态文件目录
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();
    if !static_dir.is_dir() {
        warn!("静态文件目录不存在: {}", static_dir.display());
    }

    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/search",
            get(search_products)
                .put(search_segment_as_id)
                .delete(search_segment_as_id),
        )
        .route(
            "/api/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
