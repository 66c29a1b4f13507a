//! Error handling for the dashboard client

use std::fmt;
use thiserror::Error;

/// Unified error type for the dashboard client
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Connection-level failure: DNS, refused connection, timeout, broken body stream
    #[error("Error de conexión: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("Error de Red: {status} al acceder a {path}. Respuesta: {}", .body.as_deref().unwrap_or(""))]
    Request {
        status: reqwest::StatusCode,
        path: String,
        body: Option<String>,
    },

    /// The response body was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing rendered output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template rendering errors
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl DashboardError {
    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        DashboardError::Config(msg.to_string())
    }

    /// Status code carried by a `Request` error
    pub fn status(&self) -> Option<u16> {
        match self {
            DashboardError::Request { status, .. } => Some(status.as_u16()),
            DashboardError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the error comes from talking to the API, as opposed to a local
    /// misconfiguration or a rendering failure
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            DashboardError::Network(_) | DashboardError::Request { .. } | DashboardError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_message_includes_status_and_body() {
        let err = DashboardError::Request {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            path: "/api/citas/".to_string(),
            body: Some("DB down".to_string()),
        };
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("/api/citas/"));
        assert!(message.contains("DB down"));
        assert_eq!(err.status(), Some(500));
        assert!(err.is_fetch_error());
    }

    #[test]
    fn test_request_error_without_body() {
        let err = DashboardError::Request {
            status: reqwest::StatusCode::NOT_FOUND,
            path: "/api/clientes/".to_string(),
            body: None,
        };
        assert!(err.to_string().ends_with("Respuesta: "));
    }

    #[test]
    fn test_config_error_is_not_fetch_error() {
        let err = DashboardError::config("missing base url");
        assert!(!err.is_fetch_error());
        assert_eq!(err.status(), None);
    }
}
