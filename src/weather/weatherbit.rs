use super::types::*;
use crate::config::Config;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Days requested from the daily forecast endpoint (the provider's maximum).
pub const FORECAST_DAYS: u32 = 16;

#[derive(Error, Debug)]
pub enum WeatherbitError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("No observations returned for {city}, {country}")]
    EmptyResponse { city: String, country: String },
}

pub struct WeatherbitClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherbitClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.weatherbit_base_url.trim_end_matches('/').to_string(),
            api_key: config.weatherbit_api_key.clone(),
        }
    }

    /// Latest observation for a city. Weatherbit answers with a one-element
    /// `data` array; only that element is returned.
    pub async fn get_current(
        &self,
        city: &str,
        country: &str,
    ) -> Result<CurrentWeather, WeatherbitError> {
        let url = format!("{}/current", self.base_url);

        let response: WeatherbitResponse<CurrentWeather> = self
            .make_request(&url, &[
                ("city", city),
                ("country", country),
                ("key", &self.api_key),
            ])
            .await?;

        response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| WeatherbitError::EmptyResponse {
                city: city.to_string(),
                country: country.to_string(),
            })
    }

    pub async fn get_daily_forecast(
        &self,
        city: &str,
        country: &str,
    ) -> Result<Vec<ForecastDay>, WeatherbitError> {
        let url = format!("{}/forecast/daily", self.base_url);
        let days = FORECAST_DAYS.to_string();

        let response: WeatherbitResponse<ForecastDay> = self
            .make_request(&url, &[
                ("city", city),
                ("country", country),
                ("key", &self.api_key),
                ("days", &days),
            ])
            .await?;

        Ok(response.data)
    }

    async fn make_request<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, WeatherbitError> {
        let response = self.client.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(WeatherbitError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
