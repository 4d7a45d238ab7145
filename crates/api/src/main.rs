use anyhow::Context;

use bazaar_infra::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bazaar_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let app = bazaar_api::app::build_app(&config)
        .await
        .context("failed to build services")?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
