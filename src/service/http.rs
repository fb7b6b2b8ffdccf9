//! JSON-over-HTTP collection service.
//!
//! Talks to a REST collection endpoint:
//!
//! | Operation  | Request                   |
//! |------------|---------------------------|
//! | `list_all` | `GET {base}`              |
//! | `create`   | `POST {base}` + JSON body |
//! | `update`   | `PUT {base}/{id}` + JSON  |
//! | `delete`   | `DELETE {base}/{id}`      |
//!
//! Any non-2xx status is a [`RemoteError::Status`] carrying the response
//! body; connection failures and timeouts are [`RemoteError::Transport`].

use crate::domain::{Item, ItemId, ItemPatch, NewItem, RemoteError, TodoSyncError};
use crate::service::backend::CollectionService;
use crate::Config;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::Instrument;

/// HTTP implementation of [`CollectionService`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpCollectionService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCollectionService {
    /// Builds a client for `config.base_url` with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TodoSyncError::Config`] for an empty base URL and
    /// [`TodoSyncError::Http`] if the client cannot be constructed.
    pub fn new(config: &Config) -> crate::Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(TodoSyncError::Config("base_url must not be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TodoSyncError::Http(e.to_string()))?;

        tracing::debug!(base_url = %base_url, timeout_secs = config.request_timeout_secs, "http collection service ready");

        Ok(Self { client, base_url })
    }

    /// Base URL of the collection, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: ItemId) -> String {
        format!("{}/{id}", self.base_url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, RemoteError> {
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body = %body, "request rejected");
        Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RemoteError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CollectionService for HttpCollectionService {
    async fn list_all(&self) -> Result<Vec<Item>, RemoteError> {
        let span = tracing::debug_span!("http_list_all", url = %self.base_url);
        async {
            let response = self.send(self.client.get(&self.base_url)).await?;
            Self::decode(response).await
        }
        .instrument(span)
        .await
    }

    async fn create(&self, item: &NewItem) -> Result<Item, RemoteError> {
        let span = tracing::debug_span!("http_create", url = %self.base_url);
        async {
            let response = self
                .send(self.client.post(&self.base_url).json(item))
                .await?;
            Self::decode(response).await
        }
        .instrument(span)
        .await
    }

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<Item, RemoteError> {
        let span = tracing::debug_span!("http_update", item_id = %id);
        async {
            let response = self
                .send(self.client.put(self.item_url(id)).json(patch))
                .await?;
            Self::decode(response).await
        }
        .instrument(span)
        .await
    }

    async fn delete(&self, id: ItemId) -> Result<(), RemoteError> {
        let span = tracing::debug_span!("http_delete", item_id = %id);
        self.send(self.client.delete(self.item_url(id)))
            .instrument(span)
            .await?;
        Ok(())
    }
}
