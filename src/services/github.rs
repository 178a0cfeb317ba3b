//! GitHub client
//!
//! Lists the repository root through the Contents API and downloads the raw
//! text of each selected Markdown file. Listing and downloads share one
//! client so the configured credential applies to both.

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Chapter, MarkdownSource, RepoEntry, RepoRef};
use crate::services::rate_limit;

/// Errors that can occur while talking to GitHub
#[derive(Debug, Error)]
pub enum GithubError {
    /// The API quota is exhausted; `message` is ready to show the caller
    #[error("{message}")]
    RateLimited {
        message: String,
        reset_at: Option<DateTime<Utc>>,
    },

    /// Non-success status outside the rate-limit cases
    #[error("GitHub returned {status} for {what}")]
    Upstream { status: u16, what: String },

    /// Client construction or transport failure while listing
    #[error("HTTP client error: {0}")]
    Network(#[from] reqwest::Error),

    /// Transport failure while downloading one file
    #[error("download of '{name}' failed: {source}")]
    Download {
        name: String,
        #[source]
        source: reqwest::Error,
    },

    /// 2xx listing whose body is not a contents array
    #[error("could not parse the contents listing: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the GitHub REST API
#[derive(Debug, Clone)]
pub struct GithubService {
    http: Client,
    api_root: String,
    token: Option<String>,
}

impl GithubService {
    pub fn new(api_root: impl Into<String>, token: Option<String>) -> Result<Self, GithubError> {
        let http = Client::builder()
            .user_agent(concat!("repobook/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_root: api_root.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// List the entries at the repository root.
    ///
    /// Non-success responses go through rate-limit detection first; anything
    /// else non-2xx carries the status observed. A 2xx body that is not a
    /// contents array is a parse failure, not an upstream one.
    pub async fn list_root(&self, repo: &RepoRef) -> Result<Vec<RepoEntry>, GithubError> {
        let url = format!(
            "{}/repos/{}/{}/contents",
            self.api_root, repo.owner, repo.project
        );
        debug!(%url, "listing repository root");

        let response = self.authorized(self.http.get(&url)).send().await?;
        let status = response.status();

        if !status.is_success() {
            if let Some(notice) = rate_limit::detect(status, response.headers()) {
                return Err(GithubError::RateLimited {
                    message: notice.message,
                    reset_at: notice.reset_at,
                });
            }
            return Err(GithubError::Upstream {
                status: status.as_u16(),
                what: format!("the contents listing of {}/{}", repo.owner, repo.project),
            });
        }

        let body = response.text().await?;
        let entries: Vec<RepoEntry> = serde_json::from_str(&body)?;
        Ok(entries)
    }

    /// Download each file's raw text, smallest name first (case-insensitive).
    ///
    /// One request per file, strictly in order, no retries. The first
    /// failure aborts the whole fetch and names the offending file. Entries
    /// whose download URL is empty are skipped without counting as failures.
    pub async fn fetch_markdown(
        &self,
        mut sources: Vec<MarkdownSource>,
    ) -> Result<Vec<Chapter>, GithubError> {
        sources.sort_by_key(|file| file.name.to_lowercase());

        let mut chapters = Vec::with_capacity(sources.len());
        for file in sources {
            if file.download_url.is_empty() {
                warn!(name = %file.name, "entry has no download URL, skipping");
                continue;
            }

            debug!(name = %file.name, "fetching markdown file");
            let response = self
                .authorized(self.http.get(&file.download_url))
                .send()
                .await
                .map_err(|err| GithubError::Download {
                    name: file.name.clone(),
                    source: err,
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(GithubError::Upstream {
                    status: status.as_u16(),
                    what: format!("the download of '{}'", file.name),
                });
            }

            let body = response.text().await.map_err(|err| GithubError::Download {
                name: file.name.clone(),
                source: err,
            })?;
            chapters.push(Chapter {
                name: file.name,
                body,
            });
        }

        Ok(chapters)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}
