//! Async operations for the policy TUI
//!
//! Background work runs on tokio tasks and reports back to the UI loop as
//! [`AppEvent`](super::events::AppEvent)s.

pub mod debounce;
pub mod policy_loader;

pub use debounce::Debouncer;
pub use policy_loader::PolicyLoader;
