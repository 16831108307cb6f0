use super::{CacheStore, StoreError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Upstash reply envelope: exactly one of the two fields is set.
#[derive(Debug, Deserialize)]
struct UpstashReply {
    #[serde(default)]
    result: Value,
    error: Option<String>,
}

/// Redis hosted by Upstash, spoken to through its REST interface.
///
/// Each command is POSTed to the database URL as a JSON array such as
/// `["SET", "key", "value", "EX", "600"]`.
pub struct UpstashStore {
    client: Client,
    url: String,
    token: String,
}

impl UpstashStore {
    pub fn new(client: Client, url: String, token: String) -> Self {
        Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            token,
        }
    }

    async fn command(&self, args: &[&str]) -> Result<Value, StoreError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .await?;

        let status = response.status();
        let reply: UpstashReply = response.json().await?;

        if let Some(error) = reply.error {
            return Err(StoreError::Command(error));
        }
        if !status.is_success() {
            return Err(StoreError::Command(format!("HTTP {}", status)));
        }

        Ok(reply.result)
    }
}

#[async_trait]
impl CacheStore for UpstashStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.command(&["GET", key]).await? {
            Value::Null => Ok(None),
            Value::String(value) => Ok(Some(value)),
            other => Err(StoreError::UnexpectedReply {
                command: "GET",
                reply: other.to_string(),
            }),
        }
    }

    async fn set_ex(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError> {
        let seconds = ttl.as_secs().max(1).to_string();
        self.command(&["SET", key, &value, "EX", &seconds]).await?;
        Ok(())
    }

    async fn lpush(&self, key: &str, value: String) -> Result<u64, StoreError> {
        let reply = self.command(&["LPUSH", key, &value]).await?;
        reply.as_u64().ok_or_else(|| StoreError::UnexpectedReply {
            command: "LPUSH",
            reply: reply.to_string(),
        })
    }

    async fn ltrim(&self, key: &str, start: i64, stop: i64) -> Result<(), StoreError> {
        self.command(&["LTRIM", key, &start.to_string(), &stop.to_string()])
            .await?;
        Ok(())
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        let reply = self
            .command(&["LRANGE", key, &start.to_string(), &stop.to_string()])
            .await?;

        match reply {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(value) => Ok(value),
                    other => Err(StoreError::UnexpectedReply {
                        command: "LRANGE",
                        reply: other.to_string(),
                    }),
                })
                .collect(),
            other => Err(StoreError::UnexpectedReply {
                command: "LRANGE",
                reply: other.to_string(),
            }),
        }
    }
}
