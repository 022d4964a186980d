//! Background policy fetches reporting back to the UI loop

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::api::PolicySource;
use crate::policy_tui::events::AppEvent;

/// Issues fetches against a [`PolicySource`] and posts the outcome as [`AppEvent`]s.
///
/// Responses are delivered in arrival order; nothing ties a response to the
/// search that is current when it lands.
#[derive(Clone)]
pub struct PolicyLoader {
    source: Arc<dyn PolicySource>,
    events: UnboundedSender<AppEvent>,
}

impl PolicyLoader {
    pub fn new(source: Arc<dyn PolicySource>, events: UnboundedSender<AppEvent>) -> Self {
        Self { source, events }
    }

    /// The fetch as a detached future, for deferred execution
    pub fn fetch_task(&self, search: String) -> impl Future<Output = ()> + Send + 'static {
        let source = Arc::clone(&self.source);
        let events = self.events.clone();

        async move {
            let _ = events.send(AppEvent::FetchStarted {
                search: search.clone(),
            });

            let event = match source.fetch_policies(&search).await {
                Ok(rows) => {
                    info!("Loaded {} policies for search '{}'", rows.len(), search);
                    AppEvent::PoliciesLoaded { search, rows }
                }
                Err(e) => {
                    error!("Failed to fetch policies for search '{}': {}", search, e);
                    AppEvent::PoliciesFailed {
                        search,
                        message: e.to_string(),
                    }
                }
            };

            // The UI may already be gone on shutdown
            let _ = events.send(event);
        }
    }

    /// Fetch right away
    pub fn spawn(&self, search: String) -> JoinHandle<()> {
        tokio::spawn(self.fetch_task(search))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::policy_tui::testing::{sample_rows, RecordingSource};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_successful_fetch_reports_rows() {
        let source = Arc::new(RecordingSource::new(sample_rows()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let loader = PolicyLoader::new(source.clone(), tx);

        loader.spawn("dak".to_string()).await.unwrap();

        assert!(matches!(rx.recv().await, Some(AppEvent::FetchStarted { search }) if search == "dak"));
        match rx.recv().await {
            Some(AppEvent::PoliciesLoaded { search, rows }) => {
                assert_eq!(search, "dak");
                assert_eq!(rows.len(), sample_rows().len());
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(source.searches(), vec!["dak"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_reported_not_propagated() {
        let source = Arc::new(RecordingSource::failing(|| ApiError::Status {
            status_code: 500,
            message: "boom".to_string(),
        }));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let loader = PolicyLoader::new(source, tx);

        loader.spawn(String::new()).await.unwrap();

        assert!(matches!(rx.recv().await, Some(AppEvent::FetchStarted { .. })));
        match rx.recv().await {
            Some(AppEvent::PoliciesFailed { message, .. }) => assert!(message.contains("500")),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
