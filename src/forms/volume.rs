use crate::api::{Volume, VolumeDraft};

use super::{
    join_ids, optional_date, optional_id_list, optional_reference, required, EntityForm, FormError,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeForm {
    pub title: String,
    pub author: String,
    pub publication_date: String,
    pub description: String,
    pub cover_image: String,
    pub publisher: String,
    pub isbn: String,
    pub series_id: String,
    pub chapter_ids: String,
}

impl EntityForm for VolumeForm {
    type Record = Volume;

    fn prefill(volume: &Volume) -> VolumeForm {
        VolumeForm {
            title: volume.title.clone(),
            author: volume.author.clone().unwrap_or_default(),
            publication_date: volume
                .publication_date
                .map(|date| date.to_string())
                .unwrap_or_default(),
            description: volume.description.clone().unwrap_or_default(),
            cover_image: volume.cover_image.clone().unwrap_or_default(),
            publisher: volume.publisher.clone().unwrap_or_default(),
            isbn: volume.isbn.clone().unwrap_or_default(),
            series_id: volume
                .series_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            chapter_ids: join_ids(&volume.chapter_ids),
        }
    }

    fn payload(&self) -> Result<VolumeDraft, FormError> {
        Ok(VolumeDraft {
            title: required(&self.title, "Title")?,
            author: required(&self.author, "Author")?,
            publication_date: optional_date(&self.publication_date, "Publication Date")?,
            description: self.description.clone(),
            cover_image: self.cover_image.clone(),
            publisher: self.publisher.clone(),
            isbn: self.isbn.clone(),
            series_id: optional_reference(&self.series_id, "Series ID")?,
            chapter_ids: optional_id_list(&self.chapter_ids, "Chapter IDs")?,
        })
    }

    fn fields(&mut self) -> Vec<(&'static str, &mut String)> {
        vec![
            ("Title", &mut self.title),
            ("Author", &mut self.author),
            ("Publication Date", &mut self.publication_date),
            ("Description", &mut self.description),
            ("Cover Image URL", &mut self.cover_image),
            ("Publisher", &mut self.publisher),
            ("ISBN", &mut self.isbn),
            ("Series ID", &mut self.series_id),
            ("Chapter IDs (comma-separated)", &mut self.chapter_ids),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Volume {
        Volume {
            id: 11,
            title: "Volume 1".to_owned(),
            author: None,
            publication_date: None,
            description: None,
            cover_image: None,
            publisher: None,
            isbn: None,
            series_id: Some(3),
            chapter_ids: Some(vec![21, 22, 23]),
        }
    }

    #[test]
    fn prefill_joins_chapter_ids_and_stringifies_the_reference() {
        let form = VolumeForm::prefill(&sample());

        assert_eq!(form.series_id, "3");
        assert_eq!(form.chapter_ids, "21,22,23");
        assert_eq!(form.author, "");
    }

    #[test]
    fn blank_reference_and_list_serialize_as_absent() {
        let form = VolumeForm {
            title: "Volume 2".to_owned(),
            author: "Kozue Amano".to_owned(),
            ..VolumeForm::default()
        };

        let draft = form.payload().unwrap();
        assert_eq!(draft.series_id, None);
        assert_eq!(draft.chapter_ids, None);

        // Absent means absent on the wire too, not null.
        let wire = serde_json::to_value(&draft).unwrap();
        let object = wire.as_object().unwrap();
        assert!(!object.contains_key("seriesId"));
        assert!(!object.contains_key("chapterIds"));
        assert!(!object.contains_key("publicationDate"));
        assert_eq!(object["title"], "Volume 2");
    }

    #[test]
    fn filled_reference_and_list_parse_to_numbers() {
        let form = VolumeForm {
            title: "Volume 2".to_owned(),
            author: "Kozue Amano".to_owned(),
            series_id: " 3 ".to_owned(),
            chapter_ids: "1,2,3".to_owned(),
            ..VolumeForm::default()
        };

        let draft = form.payload().unwrap();
        assert_eq!(draft.series_id, Some(3));
        assert_eq!(draft.chapter_ids, Some(vec![1, 2, 3]));
    }
}
