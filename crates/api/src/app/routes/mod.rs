use axum::Router;

pub mod orders;
pub mod products;
pub mod system;

/// Router for all domain endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .merge(orders::router())
}
