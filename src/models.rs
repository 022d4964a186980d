use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::filters::FilterError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRow {
    pub id: String,
    pub customer: Customer,
    pub provider: String,
    pub insurance_type: InsuranceType,
    pub status: PolicyStatus,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsuranceType {
    Household,
    Health,
    Liability,
}

impl InsuranceType {
    pub fn as_str(&self) -> &str {
        match self {
            InsuranceType::Household => "HOUSEHOLD",
            InsuranceType::Health => "HEALTH",
            InsuranceType::Liability => "LIABILITY",
        }
    }
}

impl FromStr for InsuranceType {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HOUSEHOLD" => Ok(InsuranceType::Household),
            "HEALTH" => Ok(InsuranceType::Health),
            "LIABILITY" => Ok(InsuranceType::Liability),
            other => Err(FilterError::UnknownInsuranceType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyStatus {
    Active,
    Pending,
    Cancelled,
    DroppedOut,
}

impl PolicyStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PolicyStatus::Active => "ACTIVE",
            PolicyStatus::Pending => "PENDING",
            PolicyStatus::Cancelled => "CANCELLED",
            PolicyStatus::DroppedOut => "DROPPED_OUT",
        }
    }

    /// Statuses that are ever shown, whatever the filter selection
    pub fn is_displayable(&self) -> bool {
        matches!(self, PolicyStatus::Active | PolicyStatus::Pending)
    }
}

impl FromStr for PolicyStatus {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(PolicyStatus::Active),
            "PENDING" => Ok(PolicyStatus::Pending),
            "CANCELLED" => Ok(PolicyStatus::Cancelled),
            "DROPPED_OUT" => Ok(PolicyStatus::DroppedOut),
            other => Err(FilterError::UnknownStatus(other.to_string())),
        }
    }
}

/// Render an API date as `YYYY-MM-DD`, falling back to the raw text
pub fn display_date(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
