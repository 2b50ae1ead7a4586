use crate::api::{Collection, CollectionDraft};

use super::{join_ids, optional_id_list, required, EntityForm, FormError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionForm {
    pub name: String,
    pub series_ids: String,
}

impl EntityForm for CollectionForm {
    type Record = Collection;

    fn prefill(collection: &Collection) -> CollectionForm {
        CollectionForm {
            name: collection.name.clone(),
            series_ids: join_ids(&collection.series_ids),
        }
    }

    fn payload(&self) -> Result<CollectionDraft, FormError> {
        Ok(CollectionDraft {
            name: required(&self.name, "Name")?,
            series_ids: optional_id_list(&self.series_ids, "Series IDs")?,
        })
    }

    fn fields(&mut self) -> Vec<(&'static str, &mut String)> {
        vec![
            ("Name", &mut self.name),
            ("Series IDs (comma-separated)", &mut self.series_ids),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_ids_stay_absent() {
        let form = CollectionForm {
            name: "Slice of Life".to_owned(),
            series_ids: String::new(),
        };

        let draft = form.payload().unwrap();
        assert_eq!(draft.series_ids, None);

        let wire = serde_json::to_value(&draft).unwrap();
        assert!(!wire.as_object().unwrap().contains_key("seriesIds"));
    }

    #[test]
    fn comma_list_parses_and_skips_empty_tokens() {
        let form = CollectionForm {
            name: "Slice of Life".to_owned(),
            series_ids: "1,,3".to_owned(),
        };

        assert_eq!(form.payload().unwrap().series_ids, Some(vec![1, 3]));
    }

    #[test]
    fn prefill_round_trips_the_id_list() {
        let collection = Collection {
            id: 9,
            name: "Slice of Life".to_owned(),
            series_ids: Some(vec![1, 2, 3]),
        };

        let form = CollectionForm::prefill(&collection);
        assert_eq!(form.series_ids, "1,2,3");
        assert_eq!(form.payload().unwrap().series_ids, Some(vec![1, 2, 3]));
    }
}
