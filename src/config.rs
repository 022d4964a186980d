//! Centralized configuration management for policyview

use std::time::Duration;

use anyhow::{Context, Result};

use crate::api::client::policies_url;
use crate::filters::{FilterKind, ALL};
use crate::models::{InsuranceType, PolicyStatus};

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Remote policy API configuration
    pub api: ApiConfig,
    /// Table and input behaviour
    pub ui: UiConfig,
    /// Option sets offered by the three selectors
    pub filters: FilterOptions,
}

/// Remote policy API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL the `/policies` path is appended to
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Delay between the last search keystroke and the refetch (milliseconds)
    pub debounce_ms: u64,
    pub rows_per_page: usize,
}

/// Selector options, without the leading `ALL`
#[derive(Debug, Clone)]
pub struct FilterOptions {
    pub providers: Vec<String>,
    pub insurance_types: Vec<String>,
    pub statuses: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            timeout_seconds: 30,
            user_agent: "policyview/0.1.0".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            rows_per_page: 3,
        }
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            providers: vec!["AOK".to_string(), "BARMER".to_string(), "DAK".to_string()],
            insurance_types: vec![
                "HOUSEHOLD".to_string(),
                "HEALTH".to_string(),
                "LIABILITY".to_string(),
            ],
            statuses: vec!["ACTIVE".to_string(), "PENDING".to_string()],
        }
    }
}

impl FilterOptions {
    /// Options as presented in a selector, `ALL` first
    pub fn options_for(&self, kind: FilterKind) -> Vec<String> {
        let values = match kind {
            FilterKind::Provider => &self.providers,
            FilterKind::InsuranceType => &self.insurance_types,
            FilterKind::Status => &self.statuses,
        };
        std::iter::once(ALL.to_string())
            .chain(values.iter().cloned())
            .collect()
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let api = ApiConfig {
            base_url: std::env::var("POLICYVIEW_API_URL").unwrap_or(defaults.api.base_url),
            timeout_seconds: parse_env_var("POLICYVIEW_HTTP_TIMEOUT_SECONDS")?
                .unwrap_or(defaults.api.timeout_seconds),
            user_agent: std::env::var("POLICYVIEW_USER_AGENT").unwrap_or(defaults.api.user_agent),
        };

        let ui = UiConfig {
            debounce_ms: parse_env_var("POLICYVIEW_DEBOUNCE_MS")?.unwrap_or(defaults.ui.debounce_ms),
            rows_per_page: parse_env_var("POLICYVIEW_ROWS_PER_PAGE")?
                .unwrap_or(defaults.ui.rows_per_page),
        };

        let filters = FilterOptions {
            providers: parse_list_var("POLICYVIEW_PROVIDERS").unwrap_or(defaults.filters.providers),
            insurance_types: parse_list_var("POLICYVIEW_INSURANCE_TYPES")
                .unwrap_or(defaults.filters.insurance_types),
            statuses: parse_list_var("POLICYVIEW_STATUSES").unwrap_or(defaults.filters.statuses),
        };

        Ok(Config { api, ui, filters })
    }

    /// Override the API base URL, e.g. from the command line
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.api.base_url = url;
        }
        self
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.ui.debounce_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.ui.rows_per_page == 0 {
            return Err(anyhow::anyhow!("Rows per page must be greater than zero"));
        }

        if self.api.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("HTTP timeout must be greater than zero"));
        }

        policies_url(&self.api.base_url, "")
            .with_context(|| format!("Invalid API base URL: {}", self.api.base_url))?;

        for value in &self.filters.insurance_types {
            value
                .parse::<InsuranceType>()
                .with_context(|| format!("Invalid insurance type option: {}", value))?;
        }
        for value in &self.filters.statuses {
            value
                .parse::<PolicyStatus>()
                .with_context(|| format!("Invalid status option: {}", value))?;
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

/// Comma separated list, `None` when unset or empty
fn parse_list_var(var_name: &str) -> Option<Vec<String>> {
    let raw = std::env::var(var_name).ok()?;
    let values: Vec<String> = raw
        .split(',')
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
