//! Error types for a single poll cycle.

use std::error::Error as StdError;

use thiserror::Error;

/// Failures while talking to the homework API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to reach homework API: {0}")]
    Connectivity(#[source] reqwest::Error),

    #[error("homework API responded with status code {0}")]
    StatusCode(u16),

    #[error("homework API returned malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures caused by a response body that does not match the API contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("unexpected type for {context}: expected {expected}, got {actual}")]
    Shape {
        context: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("missing keys in {context}: {}", .keys.join(", "))]
    MissingField {
        context: &'static str,
        keys: Vec<String>,
    },

    #[error("unexpected homework status in API response: {0}")]
    UnknownStatus(String),
}

/// The messenger rejected or never received an outgoing message.
#[derive(Debug, Error)]
#[error("failed to deliver message to Telegram: {source}")]
pub struct DeliveryError {
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl DeliveryError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl From<teloxide::RequestError> for DeliveryError {
    fn from(err: teloxide::RequestError) -> Self {
        Self::new(err)
    }
}

#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
