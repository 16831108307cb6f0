pub mod types;
pub mod weatherbit;

#[cfg(test)]
pub(crate) mod fixtures;

pub use types::{CurrentWeather, ForecastDay};
pub use weatherbit::{WeatherbitClient, WeatherbitError};
