use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Record;

/// A user-curated grouping of series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_ids: Option<Vec<u32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_ids: Option<Vec<u32>>,
}

#[async_trait]
impl Record for Collection {
    type Draft = CollectionDraft;

    const COLLECTION: &'static str = "collections";
    const NOUN: &'static str = "collection";

    fn id(&self) -> u32 {
        self.id
    }
}
