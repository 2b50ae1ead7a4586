pub mod chapter;
pub mod client;
pub mod collection;
pub mod error;
pub mod series;
pub mod session;
pub mod volume;

#[cfg(test)]
pub(crate) mod testing;

pub use chapter::{Chapter, ChapterDraft};
pub use client::{ApiClient, Transport};
pub use collection::{Collection, CollectionDraft};
pub use error::ApiError;
pub use series::{Series, SeriesDraft};
pub use session::{Session, SessionState};
pub use volume::{Volume, VolumeDraft};

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A server-persisted record with an integer id. Supplies the CRUD calls
/// shared by all four entity kinds; cross-entity references are carried as
/// bare ids and never validated client-side.
#[async_trait]
pub trait Record: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Payload for create and full-payload update: every field except `id`.
    type Draft: Serialize + Send + Sync;

    /// Path segment under `/api`, e.g. `series`.
    const COLLECTION: &'static str;
    /// Singular noun for user-facing messages.
    const NOUN: &'static str;

    fn id(&self) -> u32;

    async fn list(transport: &dyn Transport) -> Result<Vec<Self>, ApiError> {
        let path = format!("/api/{}", Self::COLLECTION);
        let body = transport.request(Method::GET, &path, None).await?;
        decode(body.unwrap_or_else(|| Value::Array(Vec::new())))
    }

    async fn fetch(transport: &dyn Transport, id: u32) -> Result<Self, ApiError> {
        let path = format!("/api/{}/{}", Self::COLLECTION, id);
        match transport.request(Method::GET, &path, None).await? {
            Some(value) => decode(value),
            // 200 with an empty body still means the entity is gone.
            None => Err(ApiError::NotFound),
        }
    }

    async fn create(transport: &dyn Transport, draft: &Self::Draft) -> Result<(), ApiError> {
        let path = format!("/api/{}", Self::COLLECTION);
        let body = encode(draft)?;
        transport.request(Method::POST, &path, Some(body)).await?;
        Ok(())
    }

    async fn update(transport: &dyn Transport, id: u32, draft: &Self::Draft) -> Result<(), ApiError> {
        let path = format!("/api/{}/{}", Self::COLLECTION, id);
        let body = encode(draft)?;
        transport.request(Method::PUT, &path, Some(body)).await?;
        Ok(())
    }

    async fn delete(transport: &dyn Transport, id: u32) -> Result<(), ApiError> {
        let path = format!("/api/{}/{}", Self::COLLECTION, id);
        transport.request(Method::DELETE, &path, None).await?;
        Ok(())
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|err| ApiError::Network(format!("unexpected response shape: {err}")))
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|err| ApiError::Network(format!("unencodable payload: {err}")))
}
