//! Shutdown coordination.

use tokio::sync::broadcast;

/// Fans a single shutdown event out to every long-running task.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver that resolves once [`Shutdown::trigger`] is called.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Notify all subscribers. Harmless when nobody is listening.
    pub fn trigger(&self) {
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::debug!(notified, "Shutdown triggered");
    }

    /// Trigger once the process receives Ctrl+C or SIGTERM.
    pub fn trigger_on_signal(&self) -> tokio::task::JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            crate::lifecycle::signals::shutdown_signal().await;
            this.trigger();
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
