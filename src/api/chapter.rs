use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Record;

/// A single readable file belonging to a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: u32,
    pub title: String,
    pub file_path: String,
    pub file_type: String,
    pub series_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterDraft {
    pub title: String,
    pub file_path: String,
    pub file_type: String,
    pub series_id: u32,
}

#[async_trait]
impl Record for Chapter {
    type Draft = ChapterDraft;

    const COLLECTION: &'static str = "chapters";
    const NOUN: &'static str = "chapter";

    fn id(&self) -> u32 {
        self.id
    }
}
