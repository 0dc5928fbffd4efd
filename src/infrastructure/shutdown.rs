use std::sync::Arc;

use tokio::sync::watch;

/// Stop flag shared between the signal handlers and the poll loop.
///
/// Once raised it stays raised; late subscribers observe it immediately.
#[derive(Clone)]
pub struct Shutdown {
    flag: Arc<watch::Sender<bool>>,
}

/// Read side handed to long-running tasks.
pub struct ShutdownListener {
    flag: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self {
            flag: Arc::new(watch::Sender::new(false)),
        }
    }

    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            flag: self.flag.subscribe(),
        }
    }

    /// Raises the flag; `reason` is only used for the log line.
    pub fn trigger(&self, reason: &str) {
        let already = self.flag.send_replace(true);
        if !already {
            tracing::info!(target: "shutdown", reason, "shutdown requested");
        }
    }
}

impl ShutdownListener {
    pub async fn notified(&mut self) {
        // An Err means every sender is gone, which can only happen after main returns.
        let _ = self.flag.wait_for(|raised| *raised).await;
    }

    pub fn is_triggered(&self) -> bool {
        *self.flag.borrow()
    }
}

/// Raises `shutdown` on the first SIGINT (Ctrl-C) or, on unix, SIGTERM.
pub fn install_signal_handlers(shutdown: Shutdown) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut term) => {
                    tokio::select! {
                        res = tokio::signal::ctrl_c() => {
                            if res.is_ok() {
                                shutdown.trigger("SIGINT");
                            }
                        }
                        _ = term.recv() => shutdown.trigger("SIGTERM"),
                    }
                    return;
                }
                Err(err) => {
                    tracing::warn!(target: "shutdown", error = %err, "SIGTERM handler unavailable");
                }
            }
        }

        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.trigger("SIGINT");
        }
    });
}
