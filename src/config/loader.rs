use std::{env, path::PathBuf, str::FromStr, time::Duration};

use url::Url;

use super::env::{
    ApiConfig, AppConfig, ConfigError, LoggingConfig, PollConfig, DEFAULT_ENDPOINT,
    DEFAULT_NAME_KEY, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRY_PERIOD, PRACTICUM_TOKEN,
    TELEGRAM_CHAT_ID, TELEGRAM_TOKEN,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(process_env)
}

pub fn load_logging_config() -> LoggingConfig {
    LoggingConfig::from_lookup(process_env)
}

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

impl AppConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut required = |key: &'static str| {
            let value = non_empty(&lookup, key);
            if value.is_none() {
                missing.push(key);
            }
            value.unwrap_or_default()
        };

        let practicum_token = required(PRACTICUM_TOKEN);
        let telegram_token = required(TELEGRAM_TOKEN);
        let telegram_chat_id = required(TELEGRAM_CHAT_ID);
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let endpoint =
            non_empty(&lookup, "PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        match Url::parse(&endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidEndpoint(endpoint)),
        }

        let api = ApiConfig {
            endpoint,
            request_timeout: positive_secs(&lookup, "REQUEST_TIMEOUT_SECS")
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        };

        let poll = PollConfig {
            retry_period: positive_secs(&lookup, "RETRY_PERIOD_SECS")
                .unwrap_or(DEFAULT_RETRY_PERIOD),
            homework_name_key: non_empty(&lookup, "HOMEWORK_NAME_KEY")
                .unwrap_or_else(|| DEFAULT_NAME_KEY.to_string()),
            require_current_date: parse_or(&lookup, "REQUIRE_CURRENT_DATE", false),
            notify_on_errors: parse_or(&lookup, "NOTIFY_ON_ERRORS", true),
        };

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            api,
            poll,
            logging: LoggingConfig::from_lookup(&lookup),
        })
    }
}

impl LoggingConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            level: non_empty(&lookup, "LOG_LEVEL").unwrap_or_else(|| "debug".to_string()),
            logs_dir: PathBuf::from(
                non_empty(&lookup, "LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
            ),
            max_files: parse_or(&lookup, "LOG_MAX_FILES", 5),
        }
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    non_empty(lookup, key).and_then(|value| value.parse::<T>().ok())
}

/// A zero interval would turn the poll loop into a busy loop, so it counts as unset.
fn positive_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    parse::<u64>(lookup, key)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    parse(lookup, key).unwrap_or(default)
}
