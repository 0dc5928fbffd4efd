mod client;
pub mod response;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;

pub use client::PracticumClient;

/// Anything that can answer "which homework statuses changed since `cursor`".
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    async fn fetch(&self, cursor: i64) -> Result<Value, ApiError>;
}
