use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/createOrder", post(create_order))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let order = match services.place_order(&body.items(), body.address()).await {
        Ok(o) => o,
        Err(e) => return errors::checkout_error_to_response(e),
    };

    (StatusCode::CREATED, Json(dto::order_to_json(order))).into_response()
}
