/// Session state definitions for the scrape lifecycle
///
/// This module defines the states a scrape session moves through and the
/// record each state carries.
use crate::product::ProductRecord;
use std::fmt;
use std::sync::Arc;

/// Coarse status of a scrape session, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// Nothing submitted yet
    Idle,

    /// A scrape request is in flight
    Pending,

    /// The last scrape returned a record
    Succeeded,

    /// The last scrape failed
    Failed,
}

impl SessionStatus {
    /// Returns true while a request is outstanding
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true if a new submission may start from this status
    ///
    /// Every status except Pending re-enters Pending on submit.
    pub fn can_submit(&self) -> bool {
        !self.is_pending()
    }

    /// Returns true if the export actions should be enabled
    pub fn can_export(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Lowercase name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full session state, carrying the record owned by each state
///
/// Pending and Failed keep the last good record so a failed re-scrape still
/// shows the previous result.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeState {
    Idle,

    Pending {
        /// Identifies the outstanding request
        ticket: u64,
        /// URL the request was issued for
        url: String,
        /// Record from an earlier success, if any
        last: Option<Arc<ProductRecord>>,
    },

    Succeeded {
        record: Arc<ProductRecord>,
    },

    Failed {
        /// Record from an earlier success, if any
        last: Option<Arc<ProductRecord>>,
    },
}

impl Default for ScrapeState {
    fn default() -> Self {
        Self::Idle
    }
}

impl ScrapeState {
    /// Returns the coarse status of this state
    pub fn status(&self) -> SessionStatus {
        match self {
            Self::Idle => SessionStatus::Idle,
            Self::Pending { .. } => SessionStatus::Pending,
            Self::Succeeded { .. } => SessionStatus::Succeeded,
            Self::Failed { .. } => SessionStatus::Failed,
        }
    }

    /// Latest known record, including one kept from before a failure
    pub fn record(&self) -> Option<&Arc<ProductRecord>> {
        match self {
            Self::Idle => None,
            Self::Pending { last, .. } | Self::Failed { last } => last.as_ref(),
            Self::Succeeded { record } => Some(record),
        }
    }
}
