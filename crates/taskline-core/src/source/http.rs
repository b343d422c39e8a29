//! Task source backed by the dashboard REST API.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::TaskSource;
use crate::error::{Result, SourceError};
use crate::storage::ApiConfig;
use crate::task::{Project, Task};

/// Normalize a configured base URL so it points at the `/api` root.
///
/// Trailing slashes are stripped and `/api` is appended when missing.
pub fn normalize_base_url(raw: &str) -> Result<Url, SourceError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_api = if trimmed.to_lowercase().ends_with("/api") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/api")
    };
    Url::parse(&with_api).map_err(|e| SourceError::InvalidBaseUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })
}

/// REST client for `GET /tasks` and `GET /projects`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: Url,
    token: Option<String>,
    http_client: Client,
}

impl HttpSource {
    /// Create a client for `base_url`, sending `token` as a bearer token when set.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a client from the `[api]` config section.
    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(|source| SourceError::Request {
                url: api.base_url.clone(),
                source,
            })?;
        Self::with_client(&api.base_url, api.token.clone(), client)
    }

    fn with_client(base_url: &str, token: Option<String>, http_client: Client) -> Result<Self> {
        let base = normalize_base_url(base_url)?;
        tracing::debug!(base = %base, "using API base URL");
        Ok(Self {
            base,
            token: token.filter(|t| !t.is_empty()),
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str, query: Option<(&str, &str)>) -> Result<Url> {
        let raw = format!("{}/{}", self.base.as_str().trim_end_matches('/'), path);
        let mut url = Url::parse(&raw).map_err(|e| SourceError::InvalidBaseUrl {
            url: raw.clone(),
            message: e.to_string(),
        })?;
        if let Some((key, value)) = query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    /// GET a JSON list. Anything other than an array counts as empty.
    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let url_str = url.to_string();
        let request_failed = |source: reqwest::Error| SourceError::Request {
            url: url_str.clone(),
            source,
        };

        let mut request = self.http_client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await.map_err(request_failed)?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(url = %url_str, status = status.as_u16(), "API request failed");
            return Err(SourceError::Status {
                url: url_str,
                status: status.as_u16(),
            }
            .into());
        }

        let is_html = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("text/html"));
        if is_html {
            return Err(SourceError::EndpointNotFound { url: url_str }.into());
        }

        let body = resp.text().await.map_err(request_failed)?;
        let malformed = |source: serde_json::Error| SourceError::Malformed {
            origin: url_str.clone(),
            source,
        };
        let value: Value = serde_json::from_str(&body).map_err(malformed)?;
        if !value.is_array() {
            tracing::debug!(url = %url_str, "non-array payload treated as empty");
            return Ok(Vec::new());
        }
        let items = serde_json::from_value(value).map_err(malformed)?;
        Ok(items)
    }
}

impl TaskSource for HttpSource {
    async fn fetch_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>> {
        let query = project_id.filter(|p| !p.is_empty()).map(|p| ("projectId", p));
        let url = self.endpoint("tasks", query)?;
        self.get_list(url).await
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>> {
        let url = self.endpoint("projects", None)?;
        self.get_list(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_api_suffix() {
        assert_eq!(
            normalize_base_url("http://localhost:5000").unwrap().as_str(),
            "http://localhost:5000/api"
        );
        assert_eq!(
            normalize_base_url("https://example.com/API//").unwrap().as_str(),
            "https://example.com/API"
        );
        assert_eq!(
            normalize_base_url(" https://example.com/v2/api ").unwrap().as_str(),
            "https://example.com/v2/api"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(normalize_base_url("not a url").is_err());
        assert!(HttpSource::new("", None).is_err());
    }

    #[test]
    fn endpoints_encode_project_filter() {
        let source = HttpSource::new("http://localhost:5000/api/", Some(String::new())).unwrap();
        assert!(source.token.is_none());
        let url = source.endpoint("tasks", Some(("projectId", "p 1"))).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/tasks?projectId=p+1");
    }
}
