use crate::api::{Chapter, ChapterDraft};

use super::{required, required_reference, EntityForm, FormError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterForm {
    pub title: String,
    pub file_path: String,
    pub file_type: String,
    pub series_id: String,
}

impl EntityForm for ChapterForm {
    type Record = Chapter;

    fn prefill(chapter: &Chapter) -> ChapterForm {
        ChapterForm {
            title: chapter.title.clone(),
            file_path: chapter.file_path.clone(),
            file_type: chapter.file_type.clone(),
            series_id: chapter.series_id.to_string(),
        }
    }

    fn payload(&self) -> Result<ChapterDraft, FormError> {
        Ok(ChapterDraft {
            title: required(&self.title, "Title")?,
            file_path: required(&self.file_path, "File Path")?,
            file_type: required(&self.file_type, "File Type")?,
            series_id: required_reference(&self.series_id, "Series ID")?,
        })
    }

    fn fields(&mut self) -> Vec<(&'static str, &mut String)> {
        vec![
            ("Title", &mut self.title),
            ("File Path", &mut self.file_path),
            ("File Type", &mut self.file_type),
            ("Series ID", &mut self.series_id),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_is_required() {
        let mut form = ChapterForm {
            title: "Chapter 1".to_owned(),
            file_path: "/library/aria/ch-01.cbz".to_owned(),
            file_type: "cbz".to_owned(),
            series_id: "3".to_owned(),
        };
        assert!(form.payload().is_ok());

        form.series_id.clear();
        assert_eq!(form.payload(), Err(FormError::Required("Series ID")));

        form.series_id = "3".to_owned();
        form.file_path.clear();
        assert_eq!(form.payload(), Err(FormError::Required("File Path")));
    }

    #[test]
    fn series_reference_must_be_numeric() {
        let form = ChapterForm {
            title: "Chapter 1".to_owned(),
            file_path: "/library/aria/ch-01.cbz".to_owned(),
            file_type: "cbz".to_owned(),
            series_id: "aria".to_owned(),
        };

        assert_eq!(form.payload(), Err(FormError::InvalidNumber("Series ID")));
    }
}
