//! HTTP access to the barbershop API

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::DashboardOptions;
use crate::error::{DashboardError, Result};
use crate::models::Resource;
use crate::section::Section;

/// Source of section data for the view controller
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch and normalize the records behind a section
    async fn fetch_section(&self, section: Section) -> Result<Vec<Value>>;
}

/// Wrap a possibly-scalar JSON response into a list.
///
/// Arrays are returned as their items, `null` as an empty list and any other
/// value as a one-element list.
pub fn normalize(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Read-only client for the API's list endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    options: DashboardOptions,
    http_client: Client,
}

impl ApiClient {
    /// Create a new client around an existing reqwest client
    pub fn new(options: DashboardOptions, http_client: Client) -> Self {
        Self {
            options,
            http_client,
        }
    }

    /// Create a new client, building a reqwest client that honors the configured timeout
    pub fn from_options(options: DashboardOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::new(options, builder.build()?))
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    /// Path of a resource under the API prefix, e.g. `/api/clientes/`
    pub fn api_path(&self, resource: &str) -> String {
        if resource.starts_with('/') {
            format!("{}{}", self.options.api_prefix, resource)
        } else {
            format!("{}/{}", self.options.api_prefix, resource)
        }
    }

    /// Absolute URL of a resource. The base URL is treated as an origin.
    pub fn endpoint(&self, resource: &str) -> Result<Url> {
        Ok(self.options.base_url.join(&self.api_path(resource))?)
    }

    /// GET a resource and return its body as JSON, unmodified
    pub async fn fetch(&self, resource: &str) -> Result<Value> {
        let path = self.api_path(resource);
        let url = self.endpoint(resource)?;

        log::debug!("GET {}", url);
        let response = self.http_client.get(url).send().await.map_err(|err| {
            log::error!("request to {} failed: {}", path, err);
            DashboardError::Network(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            log::error!("request to {} returned {}", path, status);
            return Err(DashboardError::Request { status, path, body });
        }

        let text = response.text().await?;
        let value = serde_json::from_str(&text).map_err(|err| {
            log::error!("response from {} is not JSON: {}", path, err);
            DashboardError::Json(err)
        })?;
        Ok(value)
    }

    /// List the records of one collection as typed values
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>> {
        self.fetch_section(R::SECTION)
            .await?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(DashboardError::from))
            .collect()
    }
}

#[async_trait]
impl Fetcher for ApiClient {
    async fn fetch_section(&self, section: Section) -> Result<Vec<Value>> {
        match section.resource_path() {
            Some(resource) => Ok(normalize(self.fetch(resource).await?)),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> ApiClient {
        ApiClient::new(DashboardOptions::default(), Client::new())
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(json!([1, 2])), vec![json!(1), json!(2)]);
        assert_eq!(normalize(json!({ "rut": "1-9" })), vec![json!({ "rut": "1-9" })]);
        assert!(normalize(Value::Null).is_empty());
        assert!(normalize(json!([])).is_empty());
    }

    #[test]
    fn test_api_path() {
        let client = client();
        assert_eq!(client.api_path("/clientes/"), "/api/clientes/");
        assert_eq!(client.api_path("citas/"), "/api/citas/");
    }

    #[test]
    fn test_endpoint() {
        let options = DashboardOptions::default()
            .with_base_url("http://barberia.local:3000")
            .unwrap();
        let client = ApiClient::new(options, Client::new());
        assert_eq!(
            client.endpoint("/servicios/").unwrap().as_str(),
            "http://barberia.local:3000/api/servicios/"
        );
    }

    #[tokio::test]
    async fn test_agenda_has_no_records() {
        let records = client().fetch_section(Section::Agenda).await.unwrap();
        assert!(records.is_empty());
    }
}
