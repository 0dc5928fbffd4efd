use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use reqwest::Client;
use teloxide::Bot;

use crate::{
    config::AppConfig,
    infrastructure::{notifier::TelegramNotifier, shutdown::Shutdown},
    practicum::PracticumClient,
    tasks::poller::StatusPoller,
};

pub struct HomeworkBotApp {
    poller: StatusPoller<PracticumClient, TelegramNotifier>,
    shutdown: Shutdown,
}

impl HomeworkBotApp {
    pub fn initialize(config: AppConfig, shutdown: Shutdown) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(format!("homework-status-bot/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let practicum = Arc::new(PracticumClient::new(
            http_client,
            config.api.clone(),
            config.practicum_token.clone(),
        ));

        let bot = Bot::new(&config.telegram_token);
        let notifier = Arc::new(TelegramNotifier::new(bot, &config.telegram_chat_id));

        let cursor = Utc::now().timestamp();
        tracing::info!(
            endpoint = %config.api.endpoint,
            name_key = %config.poll.homework_name_key,
            strict = config.poll.require_current_date,
            logs = %config.logging.logs_dir.display(),
            "configuration loaded"
        );
        let poller = StatusPoller::new(practicum, notifier, config.poll.clone(), cursor);

        Ok(Self { poller, shutdown })
    }

    pub async fn run(self) -> Result<()> {
        let HomeworkBotApp { poller, shutdown } = self;

        tracing::info!("homework status bot started");
        poller.run(shutdown.subscribe()).await;
        tracing::info!("homework status bot stopped");
        Ok(())
    }
}
