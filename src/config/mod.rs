pub mod env;
mod loader;

pub use env::{ApiConfig, AppConfig, LoggingConfig, PollConfig};
pub use loader::{load_config, load_logging_config};
