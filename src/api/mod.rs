//! Remote policy API
//!
//! The only remote call is `GET {base}/policies?search=...`, returning a JSON
//! array of policies. Consumers depend on the [`PolicySource`] trait so the
//! view can be driven without a network.

pub mod client;
pub mod errors;

pub use client::PolicyApi;
pub use errors::ApiError;

use async_trait::async_trait;

use crate::models::PolicyRow;

/// Anything that can produce policies for a search string
#[async_trait]
pub trait PolicySource: Send + Sync {
    async fn fetch_policies(&self, search: &str) -> Result<Vec<PolicyRow>, ApiError>;
}
