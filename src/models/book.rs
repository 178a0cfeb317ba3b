//! Book generation request and assembly types

use serde::Deserialize;

/// Request payload for book generation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub repo_url: String,
}

/// One Markdown file fetched from the repository, ready for assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub name: String,
    pub body: String,
}

/// The finished book for one repository
#[derive(Debug, Clone)]
pub struct RenderedBook {
    pub project: String,
    pub pdf: Vec<u8>,
}
