use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::ServiceError,
    history::{SearchHistory, SearchHistoryItem},
    service::WeatherService,
    weather::{CurrentWeather, ForecastDay},
};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<WeatherService>,
    pub history: Arc<SearchHistory>,
}

#[derive(Debug, Deserialize)]
pub struct LocationPath {
    pub city: String,
    pub country: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

// Route handlers
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn get_current(
    State(state): State<AppState>,
    Path(location): Path<LocationPath>,
) -> Result<Json<CurrentWeather>, ServiceError> {
    tracing::info!("Current weather requested for {}, {}", location.city, location.country);

    let current = state
        .weather
        .get_current(&location.city, &location.country)
        .await?;
    Ok(Json(current))
}

pub async fn get_forecast(
    State(state): State<AppState>,
    Path(location): Path<LocationPath>,
) -> Result<Json<Vec<ForecastDay>>, ServiceError> {
    let forecast = state
        .weather
        .get_forecast(&location.city, &location.country)
        .await?;
    Ok(Json(forecast))
}

pub async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<SearchHistoryItem>>, ServiceError> {
    Ok(Json(state.history.get_history().await?))
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/current/:city/:country", get(get_current))
        .route("/api/forecast/:city/:country", get(get_forecast))
        .route("/api/history", get(get_history))
        .with_state(state)
}
