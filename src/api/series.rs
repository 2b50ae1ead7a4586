use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiError, Record, Transport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: u32,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDraft {
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<NaiveDate>,
    pub description: String,
    pub cover_image: String,
    pub publisher: String,
    pub isbn: String,
}

#[async_trait]
impl Record for Series {
    type Draft = SeriesDraft;

    const COLLECTION: &'static str = "series";
    const NOUN: &'static str = "series";

    fn id(&self) -> u32 {
        self.id
    }
}

impl Series {
    /// Server-side search over title, author and ISBN.
    pub async fn search(transport: &dyn Transport, query: &str) -> Result<Vec<Series>, ApiError> {
        let path = format!("/api/series/search?query={}", urlencoding::encode(query));
        let body = transport.request(Method::GET, &path, None).await?;

        super::decode(body.unwrap_or_else(|| Value::Array(Vec::new())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeTransport;
    use serde_json::json;

    #[tokio::test]
    async fn list_decodes_the_collection() {
        let transport = FakeTransport::new().respond(Ok(Some(json!([
            {
                "id": 1,
                "title": "Yokohama Kaidashi Kikou",
                "author": "Hitoshi Ashinano",
                "publicationDate": "1994-06-01"
            }
        ]))));

        let series = Series::list(&transport).await.unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].title, "Yokohama Kaidashi Kikou");
        assert_eq!(
            series[0].publication_date,
            Some(NaiveDate::from_ymd_opt(1994, 6, 1).unwrap())
        );
        assert_eq!(series[0].isbn, None);
        assert_eq!(transport.requests()[0].path, "/api/series");
    }

    #[tokio::test]
    async fn search_url_encodes_the_query() {
        let transport = FakeTransport::new().respond(Ok(Some(json!([]))));

        let found = Series::search(&transport, "ashinano hitoshi").await.unwrap();

        assert!(found.is_empty());
        assert_eq!(
            transport.requests()[0].path,
            "/api/series/search?query=ashinano%20hitoshi"
        );
    }

    #[tokio::test]
    async fn fetch_maps_an_empty_body_to_not_found() {
        let transport = FakeTransport::new().respond(Ok(None));

        let err = Series::fetch(&transport, 7).await.unwrap_err();

        assert_eq!(err, ApiError::NotFound);
    }
}
