use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod cities;
mod config;
mod error;
mod gold_client;
mod page;
mod price_board;
mod types;

use api::{create_router, AppState};
use config::Config;
use gold_client::GoldPriceClient;
use price_board::PriceBoard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gold_price_backend=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting Gold Price Board...");

    let config = Config::from_env()?;
    tracing::debug!("Configuration: {:?}", config);

    // Initialize upstream client
    tracing::info!("🔗 Price API: {}", config.upstream.base_url);
    let client = GoldPriceClient::new(config.upstream.clone())?;

    tracing::info!(
        "📄 City list: {} (up to {} fetches in flight)",
        config.cities_file.display(),
        config.max_concurrent_fetches
    );
    let board = PriceBoard::new(
        Arc::new(client),
        config.cities_file.clone(),
        config.max_concurrent_fetches,
    );

    let app = create_router(AppState {
        board: Arc::new(board),
        default_limit: config.default_price_limit,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
