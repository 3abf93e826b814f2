use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use storefront_catalog::PageRequest;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(list_products))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListProductsQuery>,
) -> axum::response::Response {
    // Input-constraint checking before any query logic.
    let request = match PageRequest::new(query.limit, query.offset) {
        Ok(r) => r,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string());
        }
    };

    let page = match services.list_products(&request, &query.price_filter()).await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    (StatusCode::OK, Json(dto::product_page_to_json(page))).into_response()
}
