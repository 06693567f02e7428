//! HTTP access to an image's upstream repository
//!
//! Two endpoints cover everything charter needs: the refs API for the tag
//! list and the raw file host for per-tag file content. Both are anonymous;
//! authentication is out of scope.

use serde::Deserialize;
use tracing::debug;

use crate::error::{RemoteError, Result};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";
const GITHUB_ORG: &str = "linuxserver";
const REPO_PREFIX: &str = "docker-";

const USER_AGENT: &str = concat!("charter/", env!("CARGO_PKG_VERSION"));

/// One entry of the refs API response; only the ref name matters
#[derive(Debug, Deserialize)]
struct RefEntry {
    #[serde(rename = "ref")]
    name: String,
}

/// Client for tag listing and raw file fetching
pub struct RemoteClient {
    http: reqwest::Client,
    api_base: String,
    raw_base: String,
}

impl RemoteClient {
    /// Client against the public endpoints
    pub fn new() -> Result<Self> {
        Self::with_bases(DEFAULT_API_BASE, DEFAULT_RAW_BASE)
    }

    /// Client against custom base URLs (tests point this at a mock server)
    pub fn with_bases(api_base: impl Into<String>, raw_base: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(RemoteError::Client)?;

        Ok(Self {
            http,
            api_base: api_base.into(),
            raw_base: raw_base.into(),
        })
    }

    /// List all tag refs of an image's source repository
    ///
    /// Returns the full `refs/tags/<tag>` strings as the remote reports them.
    pub async fn list_tag_refs(&self, image: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/repos/{GITHUB_ORG}/{REPO_PREFIX}{image}/git/refs/tags",
            self.api_base
        );
        debug!(%url, "listing tag refs");

        let entries: Vec<RefEntry> = self
            .get_checked(&url)
            .await?
            .json()
            .await
            .map_err(|source| RemoteError::Request { url, source })?;

        Ok(entries.into_iter().map(|entry| entry.name).collect())
    }

    /// Fetch one raw file pinned to a tag
    pub async fn fetch_raw(&self, image: &str, tag: &str, file: &str) -> Result<Vec<u8>> {
        let url = format!(
            "{}/{GITHUB_ORG}/{REPO_PREFIX}{image}/{tag}/{file}",
            self.raw_base
        );
        debug!(%url, "fetching raw file");

        let body = self
            .get_checked(&url)
            .await?
            .bytes()
            .await
            .map_err(|source| RemoteError::Request { url, source })?;

        Ok(body.to_vec())
    }

    async fn get_checked(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| RemoteError::Request {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        Ok(response)
    }
}
