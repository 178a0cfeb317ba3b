//! Repository reference parsing

use serde::Serialize;
use url::Url;

/// Identifies a GitHub repository by its owner and project name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoRef {
    pub owner: String,
    pub project: String,
}

impl RepoRef {
    /// Parse a browser-style repository URL such as
    /// `https://github.com/rust-lang/book`.
    ///
    /// Surrounding whitespace and trailing slashes are tolerated. Path
    /// segments after the project name (e.g. `/tree/main`) are ignored.
    pub fn parse(input: &str) -> Result<Self, RepoRefError> {
        let trimmed = input.trim().trim_end_matches('/');
        let url = Url::parse(trimmed)?;

        let mut segments = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()))
            .ok_or(RepoRefError::MissingSegments)?;

        let owner = segments.next().ok_or(RepoRefError::MissingSegments)?;
        let project = segments.next().ok_or(RepoRefError::MissingSegments)?;

        Ok(Self {
            owner: owner.to_string(),
            project: project.to_string(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepoRefError {
    #[error("not a valid URL: {0}")]
    Malformed(#[from] url::ParseError),
    #[error("the URL must name both an owner and a repository")]
    MissingSegments,
}
