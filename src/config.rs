use serde::{Deserialize, Serialize};
use std::env;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub weatherbit_api_key: String,
    pub weatherbit_base_url: String,
    pub upstash_redis_rest_url: Option<String>,
    pub upstash_redis_rest_token: Option<String>,
    pub port: u16,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let upstash_redis_rest_url = env::var("UPSTASH_REDIS_REST_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        let upstash_redis_rest_token = env::var("UPSTASH_REDIS_REST_TOKEN").ok();
        if upstash_redis_rest_url.is_some() && upstash_redis_rest_token.is_none() {
            anyhow::bail!("UPSTASH_REDIS_REST_TOKEN not set");
        }

        Ok(Config {
            weatherbit_api_key: env::var("WEATHERBIT_API_KEY")
                .map_err(|_| anyhow::anyhow!("WEATHERBIT_API_KEY not set"))?,
            weatherbit_base_url: env::var("WEATHERBIT_BASE_URL")
                .unwrap_or_else(|_| "https://api.weatherbit.io/v2.0".to_string()),
            upstash_redis_rest_url,
            upstash_redis_rest_token,
            port: match env::var("PORT") {
                Ok(port) => port
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a port number, got {port:?}"))?,
                Err(_) => 8080,
            },
            http_timeout_secs: match env::var("HTTP_TIMEOUT_SECS") {
                Ok(secs) => secs
                    .parse()
                    .map_err(|_| anyhow::anyhow!("HTTP_TIMEOUT_SECS must be an integer"))?,
                Err(_) => 30,
            },
        })
    }
}

#[cfg(test)]
impl Config {
    /// Configuration pointing the upstream client at a local fake.
    pub fn for_upstream(base_url: &str) -> Self {
        Config {
            weatherbit_api_key: "test-key".to_string(),
            weatherbit_base_url: base_url.to_string(),
            upstash_redis_rest_url: None,
            upstash_redis_rest_token: None,
            port: 0,
            http_timeout_secs: 5,
        }
    }
}
