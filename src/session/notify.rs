//! User-facing notifications raised by session transitions

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;

/// Event raised for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Submission refused before any request was made
    ValidationRejected { reason: String },

    /// A scrape returned a record
    ScrapeSucceeded,

    /// A scrape failed; the cause is deliberately not exposed
    ScrapeFailed,
}

impl Notification {
    /// Message suitable for a toast or status line
    pub fn message(&self) -> String {
        match self {
            Self::ValidationRejected { reason } => reason.clone(),
            Self::ScrapeSucceeded => "Product data scraped successfully".to_string(),
            Self::ScrapeFailed => "Failed to scrape product data".to_string(),
        }
    }
}

/// Receiver of session notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match &notification {
            Notification::ValidationRejected { .. } | Notification::ScrapeFailed => {
                tracing::warn!("{}", notification.message())
            }
            Notification::ScrapeSucceeded => tracing::info!("{}", notification.message()),
        }
    }
}

/// Notification stamped with the time it was raised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedNotification {
    pub at: DateTime<Utc>,
    pub notification: Notification,
}

/// Forwards notifications into a tokio channel
pub struct ChannelNotifier {
    tx: UnboundedSender<TimedNotification>,
}

impl ChannelNotifier {
    pub fn new(tx: UnboundedSender<TimedNotification>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        // A dropped receiver means nobody is listening any more
        let _ = self.tx.send(TimedNotification {
            at: Utc::now(),
            notification,
        });
    }
}
