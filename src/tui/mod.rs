pub mod app;
pub mod login;
pub mod shelf;

pub use app::App;
