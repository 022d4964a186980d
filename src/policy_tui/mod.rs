//! Policy Terminal User Interface (TUI)
//!
//! A single screen: three selectors, a search field and a paginated table of
//! policies fetched from the remote API.

pub mod app;
pub mod components;
pub mod events;
pub mod operations;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use app::App;
pub use events::AppEvent;
