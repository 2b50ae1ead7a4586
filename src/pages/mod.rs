pub mod create;
pub mod detail;
pub mod edit;
pub mod list;

pub use create::CreatePage;
pub use detail::DetailPage;
pub use edit::EditPage;
pub use list::{ListPage, SeriesListPage, SEARCH_DEBOUNCE};

use crate::api::{Record, Session};

/// Lifecycle of anything a page fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Load<T> {
    Loading,
    Ready(T),
    NotFound,
    Failed(String),
}

impl<T> Load<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Load::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Top-level destinations. Entity views below the list (detail, create,
/// edit) are navigation state inside each tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    SeriesList,
    VolumeList,
    ChapterList,
    CollectionList,
}

/// Anonymous sessions land on the login view no matter what was asked for,
/// before any data fetch happens. The originally requested route is
/// forgotten; there is no deep-link return after login.
pub fn guard(session: &Session, requested: Route) -> Route {
    if session.is_authenticated() {
        requested
    } else {
        Route::Login
    }
}

pub(crate) fn noun_title<R: Record>() -> String {
    let mut chars = R::NOUN.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeTransport;
    use crate::api::{Chapter, Series};

    #[tokio::test]
    async fn anonymous_sessions_are_sent_to_login() {
        let session = Session::new();

        assert_eq!(guard(&session, Route::SeriesList), Route::Login);
        assert_eq!(guard(&session, Route::CollectionList), Route::Login);
        assert_eq!(guard(&session, Route::Login), Route::Login);
    }

    #[tokio::test]
    async fn authenticated_sessions_pass_through() {
        let transport = FakeTransport::new();
        let mut session = Session::new();
        session.login(&transport, "mika", "Abcde!").await.unwrap();

        assert_eq!(guard(&session, Route::VolumeList), Route::VolumeList);
    }

    #[test]
    fn noun_titles_capitalize() {
        assert_eq!(noun_title::<Series>(), "Series");
        assert_eq!(noun_title::<Chapter>(), "Chapter");
    }
}
