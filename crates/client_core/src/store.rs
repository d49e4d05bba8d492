//! Remote contact store: four REST calls against `{base}/contacts`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::domain::{Contact, ContactId};
use shared::error::ValidationError;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::{check_server_url, ConfigError, StoreSettings};

pub use reqwest::StatusCode;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("contact store unreachable: {0}")]
    Network(#[source] reqwest::Error),
    #[error("contact store returned {status}")]
    Server { status: StatusCode },
    #[error("contact store sent an unreadable response: {0}")]
    InvalidResponse(#[source] reqwest::Error),
    #[error("contact not sent: {0}")]
    InvalidContact(#[from] ValidationError),
}

impl StoreError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { status } => Some(*status),
            Self::Network(_) | Self::InvalidResponse(_) | Self::InvalidContact(_) => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Each call resolves or fails exactly once; there are no retries and no
/// cancellation. `create` and `update` refuse contacts without a name or
/// phone number before anything is sent.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Contact>, StoreError>;
    async fn create(&self, contact: &Contact) -> Result<Contact, StoreError>;
    /// Last write wins; the store performs no version check.
    async fn update(&self, contact: &Contact) -> Result<Contact, StoreError>;
    async fn delete(&self, id: &ContactId) -> Result<(), StoreError>;
}

pub struct HttpContactStore {
    http: Client,
    base_url: Url,
}

impl HttpContactStore {
    /// Fails for anything but an http(s) base URL.
    pub fn new(base_url: Url) -> Result<Self, ConfigError> {
        Ok(Self {
            http: Client::new(),
            base_url: check_server_url(base_url)?,
        })
    }

    pub fn from_settings(settings: &StoreSettings) -> Result<Self, ConfigError> {
        Self::new(settings.server_url.clone())
    }

    fn endpoint(&self, id: Option<&ContactId>) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so the segments are always there.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("contacts");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request.send().await.map_err(StoreError::Network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Server { status });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(|err| {
            if err.is_decode() {
                StoreError::InvalidResponse(err)
            } else {
                StoreError::Network(err)
            }
        })
    }
}

#[async_trait]
impl ContactStore for HttpContactStore {
    async fn list(&self) -> Result<Vec<Contact>, StoreError> {
        let contacts: Vec<Contact> = self
            .send_json(self.http.get(self.endpoint(None)))
            .await
            .inspect_err(|err| warn!(%err, "failed to list contacts"))?;
        debug!(count = contacts.len(), "listed contacts");
        Ok(contacts)
    }

    async fn create(&self, contact: &Contact) -> Result<Contact, StoreError> {
        contact.validate()?;
        let created: Contact = self
            .send_json(self.http.post(self.endpoint(None)).json(contact))
            .await
            .inspect_err(|err| warn!(%err, contact_id = %contact.id, "failed to create contact"))?;
        debug!(contact_id = %created.id, "created contact");
        Ok(created)
    }

    async fn update(&self, contact: &Contact) -> Result<Contact, StoreError> {
        contact.validate()?;
        let updated: Contact = self
            .send_json(
                self.http
                    .put(self.endpoint(Some(&contact.id)))
                    .json(contact),
            )
            .await
            .inspect_err(|err| warn!(%err, contact_id = %contact.id, "failed to update contact"))?;
        debug!(contact_id = %updated.id, "updated contact");
        Ok(updated)
    }

    async fn delete(&self, id: &ContactId) -> Result<(), StoreError> {
        self.send(self.http.delete(self.endpoint(Some(id))))
            .await
            .inspect_err(|err| warn!(%err, contact_id = %id, "failed to delete contact"))?;
        debug!(contact_id = %id, "deleted contact");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
