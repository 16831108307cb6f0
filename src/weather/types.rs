use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One observation from the `/current` endpoint, kept exactly as the
/// provider sent it. The accessors are read-only views; a missing or null
/// field reads as `None` and never rejects the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrentWeather(Value);

impl CurrentWeather {
    pub fn city_name(&self) -> Option<&str> {
        self.0.get("city_name").and_then(Value::as_str)
    }

    pub fn temp(&self) -> Option<f64> {
        self.0.get("temp").and_then(Value::as_f64)
    }

    pub fn description(&self) -> Option<&str> {
        description_of(&self.0)
    }
}

/// One day from the `/forecast/daily` endpoint, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastDay(Value);

impl ForecastDay {
    pub fn datetime(&self) -> Option<&str> {
        self.0.get("datetime").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        description_of(&self.0)
    }
}

fn description_of(payload: &Value) -> Option<&str> {
    payload
        .get("weather")
        .and_then(|weather| weather.get("description"))
        .and_then(Value::as_str)
}

/// Envelope shared by the Weatherbit endpoints: the payload is always `data`.
#[derive(Debug, Deserialize)]
pub struct WeatherbitResponse<T> {
    pub data: Vec<T>,
}
