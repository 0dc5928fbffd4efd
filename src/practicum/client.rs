use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde_json::Value;

use crate::{config::ApiConfig, error::ApiError};

use super::HomeworkSource;

#[derive(Clone)]
pub struct PracticumClient {
    http: Client,
    config: ApiConfig,
    token: String,
}

impl PracticumClient {
    pub fn new(http: Client, config: ApiConfig, token: impl Into<String>) -> Self {
        Self {
            http,
            config,
            token: token.into(),
        }
    }

    pub async fn fetch(&self, cursor: i64) -> Result<Value, ApiError> {
        tracing::info!(target: "practicum", cursor, "requesting homework statuses");
        let response = self
            .http
            .get(&self.config.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", cursor)])
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(ApiError::Connectivity)?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(target: "practicum", status = status.as_u16(), "unexpected API status");
            return Err(ApiError::StatusCode(status.as_u16()));
        }

        let body = response.text().await.map_err(ApiError::Connectivity)?;
        let payload = serde_json::from_str(&body)?;
        tracing::info!(target: "practicum", "received homework statuses");
        Ok(payload)
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch(&self, cursor: i64) -> Result<Value, ApiError> {
        PracticumClient::fetch(self, cursor).await
    }
}
