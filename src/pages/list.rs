use std::time::{Duration, Instant};

use crate::api::{ApiError, Record, Series, Transport};

use super::Load;

/// Quiet time after the last search keystroke before a request goes out.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// List view for any entity kind: one fetch of the full collection on
/// mount. Failures become a display string and the page stays up.
pub struct ListPage<R: Record> {
    pub items: Load<Vec<R>>,
}

impl<R: Record> ListPage<R> {
    pub fn new() -> ListPage<R> {
        ListPage {
            items: Load::Loading,
        }
    }

    pub async fn load(&mut self, transport: &dyn Transport) {
        self.items = Load::Loading;
        self.items = match R::list(transport).await {
            Ok(items) => Load::Ready(items),
            Err(err) => {
                Load::Failed(err.user_message(&format!("Failed to fetch {}.", R::COLLECTION)))
            }
        };
    }
}

impl<R: Record> Default for ListPage<R> {
    fn default() -> Self {
        ListPage::new()
    }
}

/// The series list carries a search box on top of the plain list. The
/// mount fetch (empty query) is immediate; afterwards every edit arms a
/// debounce window, and only the quiescent query is fetched. Each issued
/// request gets a generation number; a response is applied only if no
/// newer request has been issued since, so a slow superseded search can
/// never overwrite a newer one, and nothing is applied after the page has
/// moved on.
pub struct SeriesListPage {
    pub items: Load<Vec<Series>>,
    pub query: String,
    pending_since: Option<Instant>,
    generation: u64,
}

impl SeriesListPage {
    pub fn new() -> SeriesListPage {
        SeriesListPage {
            items: Load::Loading,
            query: String::new(),
            pending_since: None,
            generation: 0,
        }
    }

    /// Mount fetch: immediate, no debounce.
    pub async fn load(&mut self, transport: &dyn Transport) {
        let generation = self.begin();
        self.run(transport, generation).await;
    }

    /// A search-box edit. The previous debounce window is superseded.
    pub fn input(&mut self, query: String, now: Instant) {
        self.query = query;
        self.pending_since = Some(now);
    }

    /// Returns the generation to fetch once the debounce window has
    /// elapsed. An emptied search box refetches without waiting, matching
    /// the immediate full-list fetch.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        let since = self.pending_since?;
        if self.query.is_empty() || now.duration_since(since) >= SEARCH_DEBOUNCE {
            self.pending_since = None;
            return Some(self.begin());
        }

        None
    }

    pub async fn run(&mut self, transport: &dyn Transport, generation: u64) {
        if generation == self.generation {
            self.items = Load::Loading;
        }

        let result = if self.query.is_empty() {
            Series::list(transport).await
        } else {
            Series::search(transport, &self.query).await
        };

        self.apply(generation, result);
    }

    /// Stale responses (a newer generation has been issued) are dropped.
    pub fn apply(&mut self, generation: u64, result: Result<Vec<Series>, ApiError>) {
        if generation != self.generation {
            return;
        }

        self.items = match result {
            Ok(items) => Load::Ready(items),
            Err(err) => Load::Failed(err.user_message("Failed to fetch series.")),
        };
    }

    fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

impl Default for SeriesListPage {
    fn default() -> Self {
        SeriesListPage::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeTransport;
    use crate::api::Collection;
    use serde_json::json;

    #[tokio::test]
    async fn list_page_loads_the_collection() {
        let transport = FakeTransport::new().respond(Ok(Some(json!([
            { "id": 9, "name": "Slice of Life", "seriesIds": [1, 2] }
        ]))));
        let mut page = ListPage::<Collection>::new();

        page.load(&transport).await;

        let items = page.items.ready().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Slice of Life");
    }

    #[tokio::test]
    async fn list_page_failure_becomes_a_display_string() {
        let transport = FakeTransport::new().respond(Err(ApiError::Network("down".to_owned())));
        let mut page = ListPage::<Collection>::new();

        page.load(&transport).await;

        assert_eq!(
            page.items,
            Load::Failed("Failed to fetch collections.".to_owned())
        );
    }

    #[tokio::test]
    async fn two_keystrokes_within_the_window_issue_one_search() {
        let transport = FakeTransport::new().respond(Ok(Some(json!([]))));
        let mut page = SeriesListPage::new();
        let start = Instant::now();

        page.input("a".to_owned(), start);
        page.input("ab".to_owned(), start + Duration::from_millis(100));

        // Still inside the window measured from the second keystroke.
        assert_eq!(page.poll(start + Duration::from_millis(450)), None);

        let generation = page.poll(start + Duration::from_millis(700)).unwrap();
        page.run(&transport, generation).await;

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/api/series/search?query=ab");
        // Nothing left pending once the request has been issued.
        assert_eq!(page.poll(start + Duration::from_millis(1500)), None);
    }

    #[tokio::test]
    async fn clearing_the_search_box_refetches_immediately() {
        let mut page = SeriesListPage::new();
        let start = Instant::now();

        page.input(String::new(), start);

        assert!(page.poll(start).is_some());
    }

    #[tokio::test]
    async fn superseded_responses_are_dropped() {
        let mut page = SeriesListPage::new();
        let start = Instant::now();

        page.input("a".to_owned(), start);
        let first = page.poll(start + Duration::from_millis(600)).unwrap();
        page.input("ab".to_owned(), start + Duration::from_millis(700));
        let second = page.poll(start + Duration::from_millis(1300)).unwrap();

        // The slow response for "a" lands after "ab" was issued.
        page.apply(
            first,
            Ok(vec![]),
        );
        assert_eq!(page.items, Load::Loading);

        page.apply(second, Err(ApiError::Network("down".to_owned())));
        assert_eq!(page.items, Load::Failed("Failed to fetch series.".to_owned()));
    }
}
