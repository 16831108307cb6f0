//! Canned Weatherbit payloads shared by the tests.

use super::WeatherbitClient;
use crate::config::Config;
use reqwest::Client;
use serde_json::{json, Value};
use wiremock::MockServer;

pub fn client_for(server: &MockServer) -> WeatherbitClient {
    WeatherbitClient::new(Client::new(), &Config::for_upstream(&server.uri()))
}

pub fn current_json(city: &str, country: &str, temp: i64) -> Value {
    json!({
        "city_name": city,
        "country_code": country,
        "temp": temp,
        "app_temp": temp - 1,
        "weather": { "icon": "c01d", "description": "Clear sky", "code": 800 },
        "wind_spd": 3.2,
        "rh": 40,
        "aqi": 31,
        "ob_time": "2024-05-01 12:00",
        "pres": 1012,
        "snow": null
    })
}

pub fn forecast_day_json(datetime: &str) -> Value {
    json!({
        "datetime": datetime,
        "max_temp": 27,
        "min_temp": 13.4,
        "weather": { "icon": "c02d", "description": "Few clouds", "code": 801 },
        "precip": 0,
        "uv": 7.5,
        "wind_cdir_full": "east-southeast",
        "wind_spd": 2.9
    })
}
