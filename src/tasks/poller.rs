use std::sync::Arc;

use tokio::time::sleep;

use crate::{
    config::PollConfig,
    error::CycleError,
    infrastructure::{notifier::Notifier, shutdown::ShutdownListener},
    practicum::{
        response::{format_status, validate},
        HomeworkSource,
    },
};

/// What a successful cycle ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    NoUpdates,
    Notified,
    Duplicate,
}

/// The poll-validate-notify loop. Owns the cursor and the last delivered text.
pub struct StatusPoller<S, N> {
    source: Arc<S>,
    notifier: Arc<N>,
    settings: PollConfig,
    cursor: i64,
    last_message: Option<String>,
}

impl<S, N> StatusPoller<S, N>
where
    S: HomeworkSource,
    N: Notifier,
{
    pub fn new(source: Arc<S>, notifier: Arc<N>, settings: PollConfig, cursor: i64) -> Self {
        Self {
            source,
            notifier,
            settings,
            cursor,
            last_message: None,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    pub async fn run(mut self, mut shutdown: ShutdownListener) {
        tracing::info!(
            target: "poller",
            cursor = self.cursor,
            period_secs = self.settings.retry_period.as_secs(),
            "status poller started"
        );
        loop {
            if shutdown.is_triggered() {
                break;
            }

            tokio::select! {
                _ = self.run_cycle() => {}
                _ = shutdown.notified() => {
                    tracing::info!(target: "poller", "shutdown requested during poll cycle");
                    break;
                }
            }

            tokio::select! {
                _ = sleep(self.settings.retry_period) => {}
                _ = shutdown.notified() => break,
            }
        }
        tracing::info!(
            target: "poller",
            cursor = self.cursor(),
            last_message = self.last_message(),
            "status poller stopped"
        );
    }

    /// Runs one cycle and absorbs every error it produces.
    pub async fn run_cycle(&mut self) {
        match self.poll_once().await {
            Ok(outcome) => {
                tracing::debug!(target: "poller", ?outcome, cursor = self.cursor, "cycle finished");
            }
            Err(CycleError::Delivery(err)) => {
                tracing::error!(target: "poller", error = %err, "failed to send Telegram message");
            }
            Err(err) => {
                tracing::error!(target: "poller", error = %err, "poll cycle failed");
                if self.settings.notify_on_errors {
                    self.report_failure(&format!("Сбой в работе программы: {err}"))
                        .await;
                }
            }
        }
    }

    pub async fn poll_once(&mut self) -> Result<CycleOutcome, CycleError> {
        let raw = self.source.fetch(self.cursor).await?;
        let batch = validate(raw, self.settings.require_current_date)?;

        let outcome = match batch.homeworks.first() {
            None => {
                tracing::debug!(target: "poller", "no new homework statuses");
                CycleOutcome::NoUpdates
            }
            Some(homework) => {
                let message = format_status(homework, &self.settings.homework_name_key)?;
                if self.last_message.as_deref() == Some(message.as_str()) {
                    tracing::debug!(target: "poller", "status unchanged since last notification");
                    CycleOutcome::Duplicate
                } else {
                    self.notifier.notify(&message).await?;
                    self.last_message = Some(message);
                    CycleOutcome::Notified
                }
            }
        };

        if let Some(next) = batch.current_date {
            self.cursor = next;
        }
        Ok(outcome)
    }

    async fn report_failure(&mut self, message: &str) {
        if self.last_message.as_deref() == Some(message) {
            return;
        }
        match self.notifier.notify(message).await {
            Ok(()) => self.last_message = Some(message.to_string()),
            Err(err) => {
                tracing::warn!(target: "poller", error = %err, "failed to report error to Telegram");
            }
        }
    }
}
