use crate::api::{ApiError, Record, Transport};
use crate::forms::EntityForm;

use super::{noun_title, Load};

/// Edit view: fetch by id to prefill the form, then PUT the full payload
/// back to the same id. Never a partial patch.
pub struct EditPage<F: EntityForm> {
    pub record: Load<F::Record>,
    pub form: F,
    pub error: Option<String>,
}

impl<F: EntityForm> EditPage<F> {
    pub fn new() -> EditPage<F> {
        EditPage {
            record: Load::Loading,
            form: F::default(),
            error: None,
        }
    }

    pub async fn load(&mut self, transport: &dyn Transport, id: Option<u32>) {
        let Some(id) = id else {
            self.record = Load::Failed(format!("{} ID is missing.", noun_title::<F::Record>()));
            return;
        };

        match F::Record::fetch(transport, id).await {
            Ok(record) => {
                self.form = F::prefill(&record);
                self.record = Load::Ready(record);
            }
            Err(ApiError::NotFound) => self.record = Load::NotFound,
            Err(err) => {
                self.record = Load::Failed(err.user_message(&format!(
                    "Failed to fetch {} for editing.",
                    <F::Record as Record>::NOUN
                )));
            }
        }
    }

    /// True means saved: the caller navigates to the list view.
    pub async fn submit(&mut self, transport: &dyn Transport) -> bool {
        let Some(record) = self.record.ready() else {
            return false;
        };

        let draft = match self.form.payload() {
            Ok(draft) => draft,
            Err(err) => {
                self.error = Some(err.to_string());
                return false;
            }
        };

        match F::Record::update(transport, record.id(), &draft).await {
            Ok(()) => true,
            Err(err) => {
                self.error = Some(err.user_message(&format!(
                    "Failed to update {}.",
                    <F::Record as Record>::NOUN
                )));
                false
            }
        }
    }
}

impl<F: EntityForm> Default for EditPage<F> {
    fn default() -> Self {
        EditPage::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeTransport;
    use crate::forms::{SeriesForm, VolumeForm};
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn load_prefills_every_field() {
        let transport = FakeTransport::new().respond(Ok(Some(json!({
            "id": 3,
            "title": "Aria",
            "author": "Kozue Amano",
            "publisher": "Mag Garden"
        }))));
        let mut page = EditPage::<SeriesForm>::new();

        page.load(&transport, Some(3)).await;

        assert_eq!(page.form.title, "Aria");
        assert_eq!(page.form.author, "Kozue Amano");
        assert_eq!(page.form.publisher, "Mag Garden");
        assert_eq!(page.form.publication_date, "");
        assert_eq!(page.form.isbn, "");
    }

    #[tokio::test]
    async fn missing_id_is_an_immediate_error() {
        let transport = FakeTransport::new();
        let mut page = EditPage::<VolumeForm>::new();

        page.load(&transport, None).await;

        assert_eq!(page.record, Load::Failed("Volume ID is missing.".to_owned()));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn submit_puts_the_full_payload_to_the_same_id() {
        let transport = FakeTransport::new().respond(Ok(Some(json!({
            "id": 11,
            "title": "Volume 1",
            "author": "Kozue Amano",
            "seriesId": 3,
            "chapterIds": [21, 22]
        }))));
        let mut page = EditPage::<VolumeForm>::new();
        page.load(&transport, Some(11)).await;

        page.form.title = "Volume 1 (revised)".to_owned();
        let saved = page.submit(&transport).await;

        assert!(saved);
        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, Method::PUT);
        assert_eq!(requests[1].path, "/api/volumes/11");
        let body = requests[1].body.as_ref().unwrap();
        assert_eq!(body["title"], "Volume 1 (revised)");
        assert_eq!(body["author"], "Kozue Amano");
        assert_eq!(body["seriesId"], 3);
        assert_eq!(body["chapterIds"], json!([21, 22]));
    }

    #[tokio::test]
    async fn submit_failure_stays_on_the_page() {
        let transport = FakeTransport::new()
            .respond(Ok(Some(json!({ "id": 3, "title": "Aria", "author": "Kozue Amano" }))))
            .respond(Err(ApiError::Network("down".to_owned())));
        let mut page = EditPage::<SeriesForm>::new();
        page.load(&transport, Some(3)).await;

        let saved = page.submit(&transport).await;

        assert!(!saved);
        assert_eq!(page.error.as_deref(), Some("Failed to update series."));
        assert_eq!(page.form.title, "Aria");
    }
}
