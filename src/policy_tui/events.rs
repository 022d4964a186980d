//! Event handling for the policy TUI

use crate::models::PolicyRow;

/// Completed background work, delivered to the UI loop over a channel
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A fetch for `search` is about to be sent
    FetchStarted { search: String },
    /// A fetch returned rows; they replace the current collection
    PoliciesLoaded { search: String, rows: Vec<PolicyRow> },
    /// A fetch failed. Already logged; only clears the loading indicator.
    PoliciesFailed { search: String, message: String },
}
