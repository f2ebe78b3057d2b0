//! REST implementation of CollectionService
//!
//! Talks to a conventional JSON collection API:
//!
//! - `GET {base}/{resource}` — the full collection
//! - `DELETE {base}/{resource}/{id}` — one entity
//! - `POST {base}/{resource}/bulk-delete` — a JSON id list, answered with a
//!   per-item outcome body
//!
//! Non-success statuses become [`ServiceError::Http`] carrying the status
//! code and the backend's message (a structured `{"message": ...}` body is
//! preferred over raw text); transport failures become
//! [`ServiceError::Network`].

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use crate::core::entity::EntityId;
use crate::core::error::ServiceError;
use crate::source::service::{BulkOutcome, CollectionService};

/// Collection service backed by a REST endpoint
pub struct RestCollectionService<T> {
    client: reqwest::Client,
    base_url: String,
    resource: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> RestCollectionService<T> {
    /// Create a service for one resource under a base URL
    ///
    /// `resource` is the plural collection segment ("documents",
    /// "customers").
    pub fn new(base_url: impl Into<String>, resource: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, resource)
    }

    /// Create a service reusing an existing client (connection pooling,
    /// default headers)
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            resource: resource.into(),
            _entity: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.resource)
    }

    fn item_url(&self, id: &EntityId) -> String {
        format!("{}/{}/{}", self.base_url, self.resource, id)
    }
}

#[async_trait]
impl<T> CollectionService<T> for RestCollectionService<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    async fn fetch_all(&self) -> Result<Vec<T>> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;
        let items = response
            .json::<Vec<T>>()
            .await
            .map_err(|e| ServiceError::Decode {
                message: e.to_string(),
            })?;
        Ok(items)
    }

    async fn delete(&self, id: &EntityId) -> Result<()> {
        let response = self
            .client
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(transport_error)?;
        check_status(response).await?;
        Ok(())
    }

    async fn delete_many(&self, ids: &[EntityId]) -> Result<BulkOutcome> {
        let response = self
            .client
            .post(format!("{}/bulk-delete", self.collection_url()))
            .json(&ids)
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;
        let outcome = response
            .json::<BulkOutcome>()
            .await
            .map_err(|e| ServiceError::Decode {
                message: e.to_string(),
            })?;
        Ok(outcome)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::Http {
        status: status.as_u16(),
        message: extract_message(&body),
    }
    .into())
}

fn transport_error(err: reqwest::Error) -> anyhow::Error {
    ServiceError::Network {
        message: err.to_string(),
    }
    .into()
}

/// Pull the human-readable message out of an error body
///
/// Backends answer either with a structured `{"message": "..."}` object or
/// with plain text; both map to the message carried on the error.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_prefers_structured_body() {
        let body = r#"{"message": "Document is referenced by a circuit", "code": 409}"#;
        assert_eq!(
            extract_message(body),
            "Document is referenced by a circuit"
        );
    }

    #[test]
    fn test_extract_message_falls_back_to_raw_text() {
        assert_eq!(extract_message("  upstream timeout "), "upstream timeout");
        assert_eq!(extract_message(""), "");
        // JSON without a message field falls back to the raw body
        assert_eq!(extract_message(r#"{"error": 1}"#), r#"{"error": 1}"#);
    }

    #[test]
    fn test_urls_are_well_formed() {
        let service =
            RestCollectionService::<serde_json::Value>::new("https://erp.local/api/", "documents");
        assert_eq!(
            service.collection_url(),
            "https://erp.local/api/documents"
        );
        assert_eq!(
            service.item_url(&EntityId::Number(12)),
            "https://erp.local/api/documents/12"
        );
        assert_eq!(
            service.item_url(&EntityId::Code("DOC-9".into())),
            "https://erp.local/api/documents/DOC-9"
        );
    }
}
