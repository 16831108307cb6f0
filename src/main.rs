use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cache;
mod config;
mod error;
mod history;
mod routes;
mod service;
mod store;
mod weather;

use cache::CachedFetcher;
use config::Config;
use history::SearchHistory;
use routes::{create_router, AppState};
use service::WeatherService;
use store::{CacheStore, MemoryStore, UpstashStore};
use weather::WeatherbitClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_proxy_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let http_client = reqwest::Client::builder()
        .user_agent("WeatherProxy/1.0")
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    let store: Arc<dyn CacheStore> = match (
        &config.upstash_redis_rest_url,
        &config.upstash_redis_rest_token,
    ) {
        (Some(url), Some(token)) => {
            tracing::info!("Using Upstash Redis at {}", url);
            Arc::new(UpstashStore::new(http_client.clone(), url.clone(), token.clone()))
        }
        _ => {
            tracing::warn!("UPSTASH_REDIS_REST_URL not set, falling back to in-memory store");
            Arc::new(MemoryStore::default())
        }
    };

    let weather_client = Arc::new(WeatherbitClient::new(http_client, &config));
    let history = SearchHistory::new(store.clone());
    let weather = WeatherService::new(CachedFetcher::new(store), weather_client, history.clone());

    let state = AppState {
        weather: Arc::new(weather),
        history: Arc::new(history),
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server starting on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
