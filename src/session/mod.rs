//! Session module for the scrape lifecycle
//!
//! This module holds the user-facing state of a scrape session.
//!
//! # Components
//!
//! - `ScrapeState`/`SessionStatus`: The explicit state machine (Idle, Pending, Succeeded, Failed)
//! - `ScrapeSession`: Owns the input text, the state and the single-flight guard
//! - `SessionHandle`: Shared handle that releases the lock while a request is in flight
//! - `Notifier`: Receives the rejection, success and failure notifications

mod notify;
mod scrape_session;
mod state;

// Re-export main types
pub use notify::{ChannelNotifier, Notification, Notifier, TimedNotification, TracingNotifier};
pub use scrape_session::{PendingScrape, ScrapeSession, SessionError, SessionHandle};
pub use state::{ScrapeState, SessionStatus};
