//! Assignment notifications.
//!
//! # Data Flow
//! ```text
//! AssignmentService stores a run
//!     → dispatch() spawns a Tokio task
//!     → Notifier::notify(group, recipients)
//!     → failures logged + counted, never propagated
//! ```

pub mod log;

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::observability::metrics;

pub use self::log::LogNotifier;

/// Errors a notifier may report. They are logged, never returned to callers
/// of the assignment service.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification channel unavailable: {0}")]
    Unavailable(String),
}

/// Notification collaborator.
pub trait Notifier: Send + Sync + 'static {
    /// Tell `recipients` that their assignment for `group` is ready.
    fn notify(&self, group: &str, recipients: Vec<String>) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Notify in the background; errors are logged and swallowed.
pub fn dispatch<N: Notifier>(notifier: Arc<N>, group: String, recipients: Vec<String>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let count = recipients.len();
        match notifier.notify(&group, recipients).await {
            Ok(()) => {
                tracing::info!(group = %group, recipients = count, "Notifications sent");
            }
            Err(e) => {
                metrics::record_notification_failure();
                tracing::warn!(group = %group, error = %e, "Notification failed; assignment kept");
            }
        }
    })
}
