//! Book Service
//!
//! Orchestrates the pipeline for one request: parse the URL, list the
//! repository root, fetch the Markdown files, assemble the body and convert
//! it to a PDF. The scratch workspace lives for exactly this scope and is
//! removed whatever the outcome.

use thiserror::Error;
use tracing::info;

use crate::models::{RenderedBook, RepoEntry, RepoRef, RepoRefError};
use crate::services::assembler;
use crate::services::converter::{ConvertError, Converter};
use crate::services::github::{GithubError, GithubService};
use crate::services::workspace::{Workspace, WorkspaceError};

/// Errors that can occur while generating a book
#[derive(Debug, Error)]
pub enum BookError {
    #[error(transparent)]
    InvalidUrl(#[from] RepoRefError),

    #[error(transparent)]
    Github(#[from] GithubError),

    /// The repository root offers nothing to bind
    #[error("{0}")]
    NoContent(String),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Service that turns a repository URL into a PDF book
#[derive(Debug, Clone)]
pub struct BookService {
    github: GithubService,
    converter: Converter,
}

impl BookService {
    pub fn new(github: GithubService, converter: Converter) -> Self {
        Self { github, converter }
    }

    /// Run the full pipeline for one request. Stages run strictly in
    /// sequence and the first failure aborts the rest.
    pub async fn generate(&self, repo_url: &str) -> Result<RenderedBook, BookError> {
        let repo = RepoRef::parse(repo_url)?;
        info!(owner = %repo.owner, project = %repo.project, "generating book");

        let workspace = Workspace::create().await?;

        let entries = self.github.list_root(&repo).await?;
        let sources: Vec<_> = entries.iter().filter_map(RepoEntry::as_markdown).collect();
        if sources.is_empty() {
            return Err(BookError::NoContent(
                "no markdown files found in repository root".to_string(),
            ));
        }

        let chapters = self.github.fetch_markdown(sources).await?;
        if chapters.is_empty() {
            return Err(BookError::NoContent(
                "none of the markdown files could be downloaded".to_string(),
            ));
        }

        let body = assembler::assemble(&chapters);
        let pdf = self.converter.render_pdf(&workspace, &body).await?;
        info!(
            project = %repo.project,
            chapters = chapters.len(),
            bytes = pdf.len(),
            "book generated"
        );

        Ok(RenderedBook {
            project: repo.project,
            pdf,
        })
    }
}
