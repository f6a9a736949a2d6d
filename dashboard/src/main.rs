use common::tracing::init_tracing_pretty;
use dashboard::{api_client, app, config, fetcher, store};
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing_pretty();

    let config = config::Config::from_env()?;
    let cancellation_token = CancellationToken::new();

    let client = Arc::new(api_client::OpenWeatherClient::new(
        config.openweather_url.clone(),
        config.api_key.clone(),
        config.region.clone(),
    ));
    let fetcher = fetcher::Fetcher::new(
        client,
        config.max_concurrent_requests,
        cancellation_token.clone(),
    );
    let store = store::HistoryStore::new(&config.history_dir);

    info!(
        cities = config.cities.len(),
        interval_s = config.poll_interval_seconds,
        "Weather dashboard starting"
    );

    app::run(config, fetcher, store, shutdown_signal(cancellation_token)).await;

    info!("Weather dashboard stopped");
    Ok(())
}

async fn shutdown_signal(cancellation_token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        },
    }

    // Abandon any in-flight fetch cycle
    cancellation_token.cancel();
    warn!("Cancelled in-flight requests, shutting down gracefully...");
}
