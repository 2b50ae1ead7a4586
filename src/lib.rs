pub mod api;
pub mod config;
pub mod forms;
pub mod pages;
pub mod tui;

pub use crate::api::{ApiClient, Session, Transport};
pub use crate::tui::App;
