use crate::api::{ApiError, Record, Transport};

use super::{noun_title, Load};

/// Detail view: one fetch by id, edit navigation, and delete behind a
/// confirmation step. A failed delete leaves the entity on screen with the
/// error alongside it.
pub struct DetailPage<R: Record> {
    pub record: Load<R>,
    pub confirming_delete: bool,
    pub error: Option<String>,
}

impl<R: Record> DetailPage<R> {
    pub fn new() -> DetailPage<R> {
        DetailPage {
            record: Load::Loading,
            confirming_delete: false,
            error: None,
        }
    }

    /// A missing id is an immediate error; no request is attempted.
    pub async fn load(&mut self, transport: &dyn Transport, id: Option<u32>) {
        let Some(id) = id else {
            self.record = Load::Failed(format!("{} ID is missing.", noun_title::<R>()));
            return;
        };

        self.record = match R::fetch(transport, id).await {
            Ok(record) => Load::Ready(record),
            Err(ApiError::NotFound) => Load::NotFound,
            Err(err) => Load::Failed(
                err.user_message(&format!("Failed to fetch {} details.", R::NOUN)),
            ),
        };
    }

    pub fn request_delete(&mut self) {
        if self.record.ready().is_some() {
            self.confirming_delete = true;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    /// Runs the gated DELETE. True means gone: the caller navigates back to
    /// the list. On failure the page keeps the entity and shows the error.
    pub async fn confirm_delete(&mut self, transport: &dyn Transport) -> bool {
        self.confirming_delete = false;
        let Some(record) = self.record.ready() else {
            return false;
        };

        match R::delete(transport, record.id()).await {
            Ok(()) => true,
            Err(err) => {
                self.error =
                    Some(err.user_message(&format!("Failed to delete {}.", R::NOUN)));
                false
            }
        }
    }
}

impl<R: Record> Default for DetailPage<R> {
    fn default() -> Self {
        DetailPage::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeTransport;
    use crate::api::Volume;
    use reqwest::Method;
    use serde_json::json;

    fn volume_body() -> serde_json::Value {
        json!({ "id": 11, "title": "Volume 1", "seriesId": 3 })
    }

    #[tokio::test]
    async fn missing_id_never_touches_the_network() {
        let transport = FakeTransport::new();
        let mut page = DetailPage::<Volume>::new();

        page.load(&transport, None).await;

        assert_eq!(page.record, Load::Failed("Volume ID is missing.".to_owned()));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn absent_entity_reaches_not_found() {
        let transport = FakeTransport::new().respond(Err(ApiError::NotFound));
        let mut page = DetailPage::<Volume>::new();

        page.load(&transport, Some(11)).await;

        assert_eq!(page.record, Load::NotFound);
    }

    #[tokio::test]
    async fn delete_success_leaves_the_page() {
        let transport = FakeTransport::new().respond(Ok(Some(volume_body())));
        let mut page = DetailPage::<Volume>::new();
        page.load(&transport, Some(11)).await;

        page.request_delete();
        assert!(page.confirming_delete);

        let gone = page.confirm_delete(&transport).await;

        assert!(gone);
        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, Method::DELETE);
        assert_eq!(requests[1].path, "/api/volumes/11");
    }

    #[tokio::test]
    async fn delete_failure_keeps_the_entity_and_shows_the_error() {
        let transport = FakeTransport::new().respond(Ok(Some(volume_body()))).respond(Err(
            ApiError::Server {
                status: 409,
                message: "Volume is part of a collection.".to_owned(),
            },
        ));
        let mut page = DetailPage::<Volume>::new();
        page.load(&transport, Some(11)).await;

        page.request_delete();
        let gone = page.confirm_delete(&transport).await;

        assert!(!gone);
        assert!(!page.confirming_delete);
        assert_eq!(page.error.as_deref(), Some("Volume is part of a collection."));
        assert!(page.record.ready().is_some());
    }

    #[tokio::test]
    async fn cancelling_the_dialog_sends_nothing() {
        let transport = FakeTransport::new().respond(Ok(Some(volume_body())));
        let mut page = DetailPage::<Volume>::new();
        page.load(&transport, Some(11)).await;

        page.request_delete();
        page.cancel_delete();

        assert!(!page.confirming_delete);
        assert_eq!(transport.requests().len(), 1);
    }
}
