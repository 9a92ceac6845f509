//! JIRA REST client
//!
//! Every operation is a single request. Responses are classified the same
//! way everywhere: 204 is success without a body, other 2xx bodies are
//! decoded, anything else becomes [`Error::Remote`].

use jisub_core::Config;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::request::{self, require_key};
use crate::types::StoryPoints;
use crate::{BearerAuth, Error, Issue, Issues, Mapping, Result};

/// Story points custom field used when none is configured
pub const DEFAULT_POINTS_FIELD: &str = "customfield_10002";

const JSON: &str = "application/json";

#[derive(Debug)]
pub struct JiraClient {
    base_url: Url,
    auth: Option<BearerAuth>,
    points_field: String,
    http: reqwest::Client,
}

impl JiraClient {
    /// Create a client for `base_url`, e.g. `https://jira.example.com/rest/api/2`.
    ///
    /// Requests are sent without credentials when `auth` is `None`.
    pub fn new(base_url: impl Into<String>, auth: Option<BearerAuth>) -> Result<Self> {
        let base_url = base_url.into();

        let parsed = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| Error::Config(format!("invalid jira.url '{}': {}", base_url, e)))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "invalid jira.url '{}': expected an http(s) URL",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("jisub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: parsed,
            auth,
            points_field: DEFAULT_POINTS_FIELD.to_string(),
            http,
        })
    }

    /// Build a client from the stored configuration. Both `jira.url` and
    /// `user.token` must be set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let url = config
            .get("jira", "url")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Config("missing jira.url value".to_string()))?;

        let token = config
            .get("user", "token")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| Error::Config("missing user.token value".to_string()))?;

        let client = Self::new(url, Some(BearerAuth::new(token)))?;

        Ok(match config.get("jira", "points_field") {
            Some(field) => client.with_points_field(field),
            None => client,
        })
    }

    pub fn with_points_field(mut self, points_field: impl Into<String>) -> Self {
        self.points_field = points_field.into();
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn points_field(&self) -> &str {
        &self.points_field
    }

    /// Retrieve issue details by key
    pub async fn get_issue(&self, key: &str) -> Result<Issue> {
        if key.trim().is_empty() {
            return Err(Error::Validation("missing required issue key".to_string()));
        }

        let url = self.endpoint(&["issue", key])?;
        let body = self.execute::<()>(Method::GET, url, None).await?;
        decode(body)
    }

    /// Create one sub-task under `parent`
    pub async fn create_sub_task(
        &self,
        parent: &Issue,
        summary_prefix: &str,
        points: StoryPoints,
    ) -> Result<Issue> {
        let document = request::sub_task(parent, summary_prefix, points, &self.points_field)?;

        let url = self.endpoint(&["issue"])?;
        let body = self.execute(Method::POST, url, Some(&document)).await?;
        decode(body)
    }

    /// Create one sub-task per breakdown entry, e.g. `QA:2 BE:3`.
    ///
    /// An empty breakdown returns an empty collection without contacting
    /// the server.
    pub async fn create_sub_tasks(&self, parent: &Issue, breakdown: &Mapping) -> Result<Issues> {
        if breakdown.is_empty() {
            debug!("empty breakdown, no sub-tasks to create");
            return Ok(Issues::default());
        }

        let document = request::sub_tasks_bulk(parent, breakdown, &self.points_field)?;

        let url = self.endpoint(&["issue", "bulk"])?;
        let body = self.execute(Method::POST, url, Some(&document)).await?;
        decode(body)
    }

    /// Update fields on `parent`. The server decides whether the field names
    /// and values are acceptable.
    pub async fn update_issue(&self, parent: &Issue, fields: &Mapping) -> Result<()> {
        let key = require_key(parent)?;
        let document = request::field_update(parent, fields)?;

        let url = self.endpoint(&["issue", key])?;
        self.execute(Method::PUT, url, Some(&document)).await?;
        Ok(())
    }

    /// Append path segments to the base URL. Each segment is percent-encoded,
    /// so a key containing `/`, `?` or `#` stays a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("invalid jira.url '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and classify the response.
    ///
    /// Returns `None` for 204 and the raw body for any other 2xx status.
    async fn execute<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        document: Option<&B>,
    ) -> Result<Option<Vec<u8>>> {
        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, JSON);

        if let Some(document) = document {
            builder = builder
                .header(CONTENT_TYPE, JSON)
                .body(request::to_body(document)?);
        }

        if let Some(auth) = &self.auth {
            builder = builder.header(AUTHORIZATION, auth.to_header_value());
        }

        debug!(%method, %url, "sending request");
        let response = builder.send().await?;
        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "received response");

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await?;
            warn!(%method, %url, status = status.as_u16(), "request rejected");
            return Err(Error::Remote {
                status: status.as_u16(),
                body,
            });
        }

        Ok(Some(response.bytes().await?.to_vec()))
    }
}

/// Decode a response body. A body-less success yields the default value.
fn decode<T: DeserializeOwned + Default>(body: Option<Vec<u8>>) -> Result<T> {
    match body {
        Some(bytes) => serde_json::from_slice(&bytes).map_err(Error::Protocol),
        None => Ok(T::default()),
    }
}
