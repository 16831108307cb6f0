use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;
use crate::weather::WeatherbitError;

/// Everything that can go wrong while resolving a cached value.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Upstream weather provider unavailable: {0}")]
    Upstream(#[from] WeatherbitError),
    #[error("Cache store unavailable: {0}")]
    Store(#[from] StoreError),
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Cache key must not be empty")]
    EmptyKey,
}

/// Failures as reported to API clients. The message is fixed per operation;
/// the cause is only logged.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Error fetching current weather data")]
    CurrentWeather(#[source] FetchError),
    #[error("Error fetching forecast data")]
    Forecast(#[source] FetchError),
    #[error("Error fetching search history")]
    History(#[source] FetchError),
}

impl ServiceError {
    pub fn cause(&self) -> &FetchError {
        match self {
            ServiceError::CurrentWeather(cause)
            | ServiceError::Forecast(cause)
            | ServiceError::History(cause) => cause,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        tracing::error!("{}: {}", self, self.cause());

        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
