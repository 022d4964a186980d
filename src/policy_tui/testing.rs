//! Test doubles shared by the TUI tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, PolicySource};
use crate::filters::tests::policy;
use crate::models::{InsuranceType, PolicyRow, PolicyStatus};

pub(crate) fn sample_rows() -> Vec<PolicyRow> {
    vec![
        policy("1", "Smith", "Jones", "AOK", InsuranceType::Health, PolicyStatus::Active),
        policy("2", "Maria", "Lopez", "BARMER", InsuranceType::Household, PolicyStatus::Pending),
        policy("3", "Tom", "Becker", "DAK", InsuranceType::Liability, PolicyStatus::Cancelled),
        policy("4", "Lena", "Smithers", "DAK", InsuranceType::Health, PolicyStatus::Active),
        policy("5", "Paul", "Kim", "AOK", InsuranceType::Liability, PolicyStatus::DroppedOut),
        policy("6", "Eva", "Braun", "AOK", InsuranceType::Household, PolicyStatus::Active),
        policy("7", "Jan", "Novak", "BARMER", InsuranceType::Health, PolicyStatus::Pending),
        policy("8", "Ida", "Svensson", "DAK", InsuranceType::Household, PolicyStatus::Active),
        policy("9", "Omar", "Haddad", "AOK", InsuranceType::Health, PolicyStatus::Pending),
    ]
}

/// Returns fixed rows (or a fixed error) and records every search it was asked for
pub(crate) struct RecordingSource {
    rows: Vec<PolicyRow>,
    failure: Option<fn() -> ApiError>,
    searches: Mutex<Vec<String>>,
}

impl RecordingSource {
    pub(crate) fn new(rows: Vec<PolicyRow>) -> Self {
        Self {
            rows,
            failure: None,
            searches: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(failure: fn() -> ApiError) -> Self {
        Self {
            rows: Vec::new(),
            failure: Some(failure),
            searches: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl PolicySource for RecordingSource {
    async fn fetch_policies(&self, search: &str) -> Result<Vec<PolicyRow>, ApiError> {
        self.searches.lock().unwrap().push(search.to_string());
        match self.failure {
            Some(make_error) => Err(make_error()),
            None => Ok(self.rows.clone()),
        }
    }
}
