//! Scrape session - orchestration of one scrape at a time
//!
//! The session owns the input text and the state machine. A scrape is split
//! into three steps so the single-flight guard holds across the await:
//! - `begin` validates the URL and moves to Pending, returning a ticket
//! - the caller awaits the scrape client
//! - `finish` applies the outcome for that ticket
//!
//! A response is applied even if the input text changed while it was in
//! flight. The remote request is never cancelled, but if the awaiting future
//! is dropped the request counts as failed so the user can submit again.

use crate::client::ScrapeClient;
use crate::product::ProductRecord;
use crate::session::notify::{Notification, Notifier};
use crate::session::state::{ScrapeState, SessionStatus};
use crate::url::UrlRules;
use crate::{RequestError, ValidationError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Errors returned by session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0}")]
    Rejected(#[from] ValidationError),

    #[error("A scrape is already in progress")]
    AlreadyPending,

    #[error("Completion for request #{0} does not match the pending request")]
    UnknownTicket(u64),
}

impl SessionError {
    /// Notification the user sees for this error, if any
    ///
    /// Only rejections are reported; a refused re-submit is silent.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::Rejected(e) => Some(Notification::ValidationRejected {
                reason: e.to_string(),
            }),
            Self::AlreadyPending | Self::UnknownTicket(_) => None,
        }
    }
}

/// Proof that a request was started, redeemed by `finish`
#[derive(Debug)]
pub struct PendingScrape {
    ticket: u64,
    url: String,
}

impl PendingScrape {
    /// URL the request must be issued for
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

/// State holder for one user session
pub struct ScrapeSession {
    input_url: String,
    state: ScrapeState,
    rules: UrlRules,
    notifier: Arc<dyn Notifier>,
    next_ticket: u64,
}

impl ScrapeSession {
    /// Creates an idle session with no record
    pub fn new(rules: UrlRules, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            input_url: String::new(),
            state: ScrapeState::Idle,
            rules,
            notifier,
            next_ticket: 1,
        }
    }

    /// Current input text
    pub fn input_url(&self) -> &str {
        &self.input_url
    }

    /// Replaces the input text; allowed in every state
    pub fn set_input_url(&mut self, text: impl Into<String>) {
        self.input_url = text.into();
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status()
    }

    pub fn state(&self) -> &ScrapeState {
        &self.state
    }

    /// Latest known record, kept across failures
    pub fn record(&self) -> Option<Arc<ProductRecord>> {
        self.state.record().cloned()
    }

    /// Record to export, only available after a successful scrape
    pub fn exportable_record(&self) -> Option<Arc<ProductRecord>> {
        match &self.state {
            ScrapeState::Succeeded { record } => Some(record.clone()),
            _ => None,
        }
    }

    /// Starts a scrape of `url`
    ///
    /// Refuses while another request is pending. Blank or unacceptable URLs
    /// raise a rejection notification and leave the state untouched.
    pub fn begin(&mut self, url: &str) -> Result<PendingScrape, SessionError> {
        let result = self.begin_silent(url);
        if let Err(e) = &result {
            self.emit(e.notification());
        }
        result
    }

    /// Applies the outcome of the request identified by `pending`
    ///
    /// Success replaces the record; failure keeps whatever record was there.
    pub fn finish(
        &mut self,
        pending: PendingScrape,
        outcome: Result<ProductRecord, RequestError>,
    ) -> Result<SessionStatus, SessionError> {
        let (status, notification) = self.finish_silent(pending, outcome)?;
        self.emit(Some(notification));
        Ok(status)
    }

    /// Marks the request for `ticket` as failed if it is still pending
    ///
    /// Used when the caller stops waiting for the response. Returns false if
    /// the request already completed.
    pub fn abandon(&mut self, ticket: u64) -> bool {
        let notification = self.abandon_silent(ticket);
        let abandoned = notification.is_some();
        self.emit(notification);
        abandoned
    }

    /// Runs a complete scrape of `url` with exclusive access to the session
    pub async fn submit(
        &mut self,
        url: &str,
        client: &dyn ScrapeClient,
    ) -> Result<SessionStatus, SessionError> {
        let pending = self.begin(url)?;
        let mut in_flight = AbandonOnDrop {
            session: self,
            ticket: pending.ticket,
        };
        let outcome = client.scrape(pending.url()).await;
        in_flight.session.finish(pending, outcome)
    }

    fn emit(&self, notification: Option<Notification>) {
        if let Some(notification) = notification {
            self.notifier.notify(notification);
        }
    }

    fn begin_silent(&mut self, url: &str) -> Result<PendingScrape, SessionError> {
        if self.state.status().is_pending() {
            tracing::warn!("Submit ignored: a scrape is already in progress");
            return Err(SessionError::AlreadyPending);
        }

        if let Err(e) = self.rules.check(url) {
            tracing::warn!("Rejected URL '{}': {}", url, e);
            return Err(e.into());
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let url = url.trim().to_string();
        let last = self.state.record().cloned();
        self.state = ScrapeState::Pending {
            ticket,
            url: url.clone(),
            last,
        };

        tracing::info!("Scrape #{} started for {}", ticket, url);
        Ok(PendingScrape { ticket, url })
    }

    fn finish_silent(
        &mut self,
        pending: PendingScrape,
        outcome: Result<ProductRecord, RequestError>,
    ) -> Result<(SessionStatus, Notification), SessionError> {
        let last = match &self.state {
            ScrapeState::Pending { ticket, last, .. } if *ticket == pending.ticket => last.clone(),
            _ => return Err(SessionError::UnknownTicket(pending.ticket)),
        };

        let notification = match outcome {
            Ok(record) => {
                tracing::info!("Scrape #{} succeeded: {}", pending.ticket, record.name);
                self.state = ScrapeState::Succeeded {
                    record: Arc::new(record),
                };
                Notification::ScrapeSucceeded
            }
            Err(e) => {
                tracing::warn!("Scrape #{} failed for {}: {}", pending.ticket, pending.url, e);
                self.state = ScrapeState::Failed { last };
                Notification::ScrapeFailed
            }
        };

        Ok((self.state.status(), notification))
    }

    fn abandon_silent(&mut self, ticket: u64) -> Option<Notification> {
        let last = match &self.state {
            ScrapeState::Pending { ticket: pending, last, .. } if *pending == ticket => last.clone(),
            _ => return None,
        };

        tracing::warn!("Scrape #{} abandoned before its response arrived", ticket);
        self.state = ScrapeState::Failed { last };
        Some(Notification::ScrapeFailed)
    }
}

/// Fails the pending request if the awaiting future is dropped early
struct AbandonOnDrop<'a> {
    session: &'a mut ScrapeSession,
    ticket: u64,
}

impl Drop for AbandonOnDrop<'_> {
    fn drop(&mut self) {
        self.session.abandon(self.ticket);
    }
}

/// Shareable handle to a session and its scrape client
///
/// The lock is released while the request is in flight, so the input text can
/// be edited and the status read during Pending. Notifications are delivered
/// after the lock is released, so a notifier may read the handle.
#[derive(Clone)]
pub struct SessionHandle {
    session: Arc<Mutex<ScrapeSession>>,
    client: Arc<dyn ScrapeClient>,
}

impl SessionHandle {
    pub fn new(session: ScrapeSession, client: Arc<dyn ScrapeClient>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            client,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ScrapeSession> {
        // State stays consistent even if a caller panicked mid-transition
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` under the lock, then delivers its notification unlocked
    fn transition<T>(
        &self,
        f: impl FnOnce(&mut ScrapeSession) -> (T, Option<Notification>),
    ) -> T {
        let (value, notification, notifier) = {
            let mut session = self.lock();
            let (value, notification) = f(&mut *session);
            (value, notification, session.notifier.clone())
        };

        if let Some(notification) = notification {
            notifier.notify(notification);
        }
        value
    }

    pub fn input_url(&self) -> String {
        self.lock().input_url().to_string()
    }

    pub fn set_input_url(&self, text: impl Into<String>) {
        self.lock().set_input_url(text);
    }

    pub fn status(&self) -> SessionStatus {
        self.lock().status()
    }

    pub fn record(&self) -> Option<Arc<ProductRecord>> {
        self.lock().record()
    }

    pub fn exportable_record(&self) -> Option<Arc<ProductRecord>> {
        self.lock().exportable_record()
    }

    /// Scrapes `url`, refusing if a request is already in flight
    ///
    /// Dropping the returned future before it completes fails the request.
    pub async fn submit(&self, url: &str) -> Result<SessionStatus, SessionError> {
        let pending = self.transition(|session| {
            let result = session.begin_silent(url);
            let notification = result.as_ref().err().and_then(SessionError::notification);
            (result, notification)
        })?;

        let _in_flight = HandleAbandonOnDrop {
            handle: self,
            ticket: pending.ticket,
        };
        let outcome = self.client.scrape(pending.url()).await;

        self.transition(|session| match session.finish_silent(pending, outcome) {
            Ok((status, notification)) => (Ok(status), Some(notification)),
            Err(e) => (Err(e), None),
        })
    }

    /// Scrapes whatever URL is currently in the input field
    pub async fn submit_input(&self) -> Result<SessionStatus, SessionError> {
        let url = self.input_url();
        self.submit(&url).await
    }
}

/// Fails the handle's pending request if the awaiting future is dropped early
struct HandleAbandonOnDrop<'a> {
    handle: &'a SessionHandle,
    ticket: u64,
}

impl Drop for HandleAbandonOnDrop<'_> {
    fn drop(&mut self) {
        let ticket = self.ticket;
        self.handle
            .transition(|session| ((), session.abandon_silent(ticket)));
    }
}
