//! policyview: a terminal browser for insurance policies served by a remote API.
//!
//! Policies are fetched with a single `GET /policies?search=...`, filtered
//! client-side by search text and three categorical selectors, and paginated
//! client-side.

pub mod api;
pub mod config;
pub mod filters;
pub mod models;
pub mod pagination;
pub mod policy_tui;
pub mod report;
