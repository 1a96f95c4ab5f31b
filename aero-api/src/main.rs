use aero_api::{app, AppState};
use aero_store::{AmadeusClient, Config};
use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aero_api=debug,aero_offer=info,aero_store=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Aero API on port {}", config.server.port);
    tracing::debug!("Offer source: {:?}", config.offer_source);

    let source = AmadeusClient::new(&config.offer_source).context("Failed to build offer source client")?;

    let app_state = AppState::new(Arc::new(source), config.filters.clone(), config.search.clone());
    app_state.spawn_idle_sweeper(&config.sessions);
    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
