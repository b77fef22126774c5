use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sentinel_observability::init();

    let config = sentinel_api::config::ApiConfig::from_env().context("invalid configuration")?;
    let app = sentinel_api::app::build_app(&config).context("failed to build application")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, issuer = config.token.issuer(), "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
