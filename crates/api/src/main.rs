use anyhow::Context;

const DEFAULT_ADDR: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ocm_observability::init();

    let addr = std::env::var("OCM_API_ADDR").unwrap_or_else(|_| {
        tracing::info!("OCM_API_ADDR not set; using {DEFAULT_ADDR}");
        DEFAULT_ADDR.to_string()
    });

    let app = ocm_api::app::build_app(ocm_api::memory::servers());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
