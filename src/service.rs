use std::sync::Arc;

use crate::cache::CachedFetcher;
use crate::error::{FetchError, ServiceError};
use crate::history::SearchHistory;
use crate::weather::{CurrentWeather, ForecastDay, WeatherbitClient};

pub fn current_cache_key(city: &str, country: &str) -> String {
    format!("current:{}:{}", city, country)
}

pub fn forecast_cache_key(city: &str, country: &str) -> String {
    format!("forecast:{}:{}", city, country)
}

/// Cache-backed proxy in front of the Weatherbit API.
pub struct WeatherService {
    fetcher: CachedFetcher,
    client: Arc<WeatherbitClient>,
    history: SearchHistory,
}

impl WeatherService {
    pub fn new(fetcher: CachedFetcher, client: Arc<WeatherbitClient>, history: SearchHistory) -> Self {
        Self {
            fetcher,
            client,
            history,
        }
    }

    /// Current conditions for a city. Every successful lookup, cached or not,
    /// is recorded in the search history.
    pub async fn get_current(&self, city: &str, country: &str) -> Result<CurrentWeather, ServiceError> {
        let key = current_cache_key(city, country);
        let client = &self.client;

        let current = self
            .fetcher
            .get_or_compute(&key, || async move {
                client
                    .get_current(city, country)
                    .await
                    .map_err(FetchError::from)
            })
            .await
            .map_err(ServiceError::CurrentWeather)?;
        tracing::debug!(
            "{} now: {:?}°C, {}",
            current.city_name().unwrap_or(city),
            current.temp(),
            current.description().unwrap_or("no description")
        );

        self.history
            .record(city, country)
            .await
            .map_err(ServiceError::CurrentWeather)?;

        Ok(current)
    }

    pub async fn get_forecast(&self, city: &str, country: &str) -> Result<Vec<ForecastDay>, ServiceError> {
        let key = forecast_cache_key(city, country);
        let client = &self.client;

        let days = self
            .fetcher
            .get_or_compute(&key, || async move {
                client
                    .get_daily_forecast(city, country)
                    .await
                    .map_err(FetchError::from)
            })
            .await
            .map_err(ServiceError::Forecast)?;

        if let (Some(first), Some(last)) = (days.first(), days.last()) {
            tracing::debug!(
                "{} forecast days for {}, {} ({:?} to {:?}), starting {}",
                days.len(),
                city,
                country,
                first.datetime(),
                last.datetime(),
                first.description().unwrap_or("no description")
            );
        }

        Ok(days)
    }
}
