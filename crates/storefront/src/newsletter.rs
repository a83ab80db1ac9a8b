//! Newsletter subscription.
//!
//! Subscribing an address that is already on the list is reported as
//! [`SubscribeOutcome::AlreadySubscribed`] and treated as success by the
//! UI: the shopper is in the system either way, and leaking "this email
//! exists" as an error helps no one.

use std::collections::BTreeMap;
use std::sync::Mutex;

use kuyen_core::{Email, EmailError, SubscriberId};
use thiserror::Error;
use tracing::instrument;

/// Errors from newsletter operations.
#[derive(Debug, Error)]
pub enum NewsletterError {
    /// The submitted address is not a valid email.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    /// The subscriber directory failed.
    #[error("subscriber directory error: {0}")]
    Directory(String),
}

/// The result of a subscription attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// The address was added to the list.
    Subscribed(SubscriberId),
    /// The address was already on the list; treated as success.
    AlreadySubscribed,
}

/// The subscriber storage collaborator.
pub trait SubscriberDirectory {
    /// Add an email to the list, reporting whether it was new.
    fn subscribe(
        &self,
        email: &Email,
    ) -> impl Future<Output = Result<SubscribeOutcome, NewsletterError>> + Send;
}

/// Validate a raw form submission and subscribe it.
///
/// # Errors
///
/// Returns [`NewsletterError::InvalidEmail`] for a malformed address, or
/// whatever the directory reports.
#[instrument(skip(directory))]
pub async fn subscribe_email<D: SubscriberDirectory>(
    directory: &D,
    raw_email: &str,
) -> Result<SubscribeOutcome, NewsletterError> {
    let email = Email::parse(raw_email)?;
    directory.subscribe(&email).await
}

/// An in-memory subscriber directory for tests.
#[derive(Debug, Default)]
pub struct InMemorySubscribers {
    entries: Mutex<BTreeMap<String, SubscriberId>>,
}

impl InMemorySubscribers {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subscribers on the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SubscriberDirectory for InMemorySubscribers {
    async fn subscribe(&self, email: &Email) -> Result<SubscribeOutcome, NewsletterError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| NewsletterError::Directory("lock poisoned".to_string()))?;

        if entries.contains_key(email.as_str()) {
            return Ok(SubscribeOutcome::AlreadySubscribed);
        }

        let id = SubscriberId::new(i64::try_from(entries.len()).unwrap_or(i64::MAX) + 1);
        entries.insert(email.as_str().to_string(), id);
        Ok(SubscribeOutcome::Subscribed(id))
    }
}
