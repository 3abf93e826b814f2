use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let services = Arc::new(storefront_api::app::services::build_services().await?);
    let app = storefront_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
