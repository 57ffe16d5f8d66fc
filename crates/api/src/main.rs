use anyhow::Context;

use stockroom_infra::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    stockroom_observability::init(config.log_format);

    if config.api_key.is_none() {
        tracing::warn!("STOCKROOM_API_KEY not set; every caller may modify inventory");
    }

    let store = stockroom_api::app::services::build_store(&config)
        .await
        .context("failed to open inventory store")?;

    let app = stockroom_api::app::build_app(store, config.api_key.clone());

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
