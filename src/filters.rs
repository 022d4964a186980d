//! Client-side filtering of fetched policies
//!
//! The filtered set is always re-derived in full from the fetched rows, the
//! search text and the three categorical selections.

use std::str::FromStr;
use thiserror::Error;

use crate::models::{InsuranceType, PolicyRow, PolicyStatus};

/// Sentinel option meaning "no constraint"
pub const ALL: &str = "ALL";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Unknown policy status '{0}'. Expected one of ALL, ACTIVE, PENDING, CANCELLED, DROPPED_OUT")]
    UnknownStatus(String),

    #[error("Unknown insurance type '{0}'. Expected one of ALL, HOUSEHOLD, HEALTH, LIABILITY")]
    UnknownInsuranceType(String),
}

/// A categorical selection: either unconstrained or a concrete value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> Selection<T> {
    /// Parse a dropdown option, treating `ALL` as no constraint
    pub fn parse_option(value: &str) -> Result<Self, T::Err> {
        if value.trim().eq_ignore_ascii_case(ALL) {
            Ok(Selection::All)
        } else {
            value.parse().map(Selection::Only)
        }
    }
}

/// Which categorical filter an edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Status,
    InsuranceType,
    Provider,
}

impl FilterKind {
    pub fn label(&self) -> &str {
        match self {
            FilterKind::Provider => "Provider:",
            FilterKind::InsuranceType => "Type:",
            FilterKind::Status => "Status:",
        }
    }
}

/// The three categorical selections of the policy view
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableFilters {
    pub status: Selection<PolicyStatus>,
    pub insurance_type: Selection<InsuranceType>,
    pub provider: Selection<String>,
}

impl TableFilters {
    /// Set one filter from its option string. On error the filters are unchanged.
    pub fn set(&mut self, kind: FilterKind, value: &str) -> Result<(), FilterError> {
        match kind {
            FilterKind::Status => self.status = Selection::parse_option(value)?,
            FilterKind::InsuranceType => self.insurance_type = Selection::parse_option(value)?,
            FilterKind::Provider => {
                self.provider = if value.trim().eq_ignore_ascii_case(ALL) {
                    Selection::All
                } else {
                    Selection::Only(value.to_string())
                }
            }
        }
        Ok(())
    }

    pub fn matches(&self, row: &PolicyRow) -> bool {
        self.status.matches(&row.status)
            && self.insurance_type.matches(&row.insurance_type)
            && self.provider.matches(&row.provider)
    }
}

/// Case-insensitive substring match on first name, last name or provider
pub fn matches_search(row: &PolicyRow, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    row.customer.first_name.to_lowercase().contains(&needle)
        || row.customer.last_name.to_lowercase().contains(&needle)
        || row.provider.to_lowercase().contains(&needle)
}

/// Derive the displayed rows, preserving the order of `rows`
pub fn filter_policies(rows: &[PolicyRow], filters: &TableFilters, search: &str) -> Vec<PolicyRow> {
    rows.iter()
        .filter(|row| row.status.is_displayable())
        .filter(|row| filters.matches(row))
        .filter(|row| matches_search(row, search))
        .cloned()
        .collect()
}
