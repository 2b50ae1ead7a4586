use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
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
    /// Weak reference to the series this volume belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<u32>,
    /// Weak references to the chapters bound into this volume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_ids: Option<Vec<u32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeDraft {
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<NaiveDate>,
    pub description: String,
    pub cover_image: String,
    pub publisher: String,
    pub isbn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_ids: Option<Vec<u32>>,
}

#[async_trait]
impl Record for Volume {
    type Draft = VolumeDraft;

    const COLLECTION: &'static str = "volumes";
    const NOUN: &'static str = "volume";

    fn id(&self) -> u32 {
        self.id
    }
}
