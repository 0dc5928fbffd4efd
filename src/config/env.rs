use std::{path::PathBuf, time::Duration};

use thiserror::Error;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_NAME_KEY: &str = "homework_name";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub api: ApiConfig,
    pub poll: PollConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub endpoint: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub retry_period: Duration,
    /// Key holding the homework title; deployments differ between
    /// `homework_name` and `lesson_name`.
    pub homework_name_key: String,
    pub require_current_date: bool,
    /// Report cycle failures to the chat as well as the log.
    pub notify_on_errors: bool,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub logs_dir: PathBuf,
    pub max_files: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("PRACTICUM_ENDPOINT is not a valid http(s) url: {0}")]
    InvalidEndpoint(String),
}
