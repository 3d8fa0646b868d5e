//! Notifier that writes one log event per recipient.

use crate::notify::{Notifier, NotifyError};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for LogNotifier {
    async fn notify(&self, group: &str, recipients: Vec<String>) -> Result<(), NotifyError> {
        for recipient in &recipients {
            tracing::info!(group = %group, recipient = %recipient, "Your gift exchange assignment is ready");
        }
        Ok(())
    }
}
