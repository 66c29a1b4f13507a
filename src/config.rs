//! Configuration options for the dashboard client

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{DashboardError, Result};

/// Default origin the API is served from
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Namespace every resource path is mounted under
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Default timestamp layout, day first as in the es-CL locale
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d-%m-%Y, %H:%M:%S";

/// Time zone timestamps are converted into before display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The zone of the machine running the client
    #[default]
    Local,
    Utc,
}

/// Options controlling how timestamps and other cells are displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub display_zone: DisplayZone,
    pub timestamp_format: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            display_zone: DisplayZone::Local,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

/// Configuration options for the dashboard client
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Origin of the API server
    pub base_url: Url,

    /// Path prefix prepended to every resource path
    pub api_prefix: String,

    /// The request timeout. `None` waits as long as the server does.
    pub request_timeout: Option<Duration>,

    /// Cell formatting options
    pub render: RenderOptions,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            request_timeout: None,
            render: RenderOptions::default(),
        }
    }
}

impl DashboardOptions {
    /// Build options from `BARBERIA_API_URL`, `BARBERIA_API_PREFIX` and
    /// `BARBERIA_TIMEOUT_SECS`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();

        if let Ok(url) = env::var("BARBERIA_API_URL") {
            options = options.with_base_url(&url)?;
        }
        if let Ok(prefix) = env::var("BARBERIA_API_PREFIX") {
            options = options.with_api_prefix(&prefix);
        }
        if let Ok(secs) = env::var("BARBERIA_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                DashboardError::config(format!("BARBERIA_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            options = options.with_request_timeout(Some(Duration::from_secs(secs)));
        }

        Ok(options)
    }

    /// Set the API origin
    pub fn with_base_url(mut self, value: &str) -> Result<Self> {
        let url = Url::parse(value)?;
        if url.cannot_be_a_base() {
            return Err(DashboardError::config(format!("{} cannot be used as a base url", value)));
        }
        self.base_url = url;
        Ok(self)
    }

    /// Set the API prefix. Leading and trailing slashes are normalized.
    pub fn with_api_prefix(mut self, value: &str) -> Self {
        let trimmed = value.trim_matches('/');
        self.api_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the zone timestamps are displayed in
    pub fn with_display_zone(mut self, value: DisplayZone) -> Self {
        self.render.display_zone = value;
        self
    }

    /// Set the chrono format string used for timestamps
    pub fn with_timestamp_format(mut self, value: &str) -> Self {
        self.render.timestamp_format = value.to_string();
        self
    }
}
