//! Wire types for the GitHub Contents API directory listing

use serde::Deserialize;

/// One entry of a directory listing returned by
/// `GET /repos/{owner}/{repo}/contents`
#[derive(Debug, Clone, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Raw-content URL; GitHub omits it for directories and submodules
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Entry kind as reported by GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// Absorbs every other kind string (symlink, submodule, future ones)
    #[serde(other)]
    Other,
}

/// A Markdown file selected for the book, with the URL to fetch its raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownSource {
    pub name: String,
    pub download_url: String,
}

impl RepoEntry {
    /// Returns the entry as a Markdown source when it is a file whose name
    /// ends in `.md` (case-insensitive) and GitHub published a download URL.
    pub fn as_markdown(&self) -> Option<MarkdownSource> {
        if self.kind != EntryKind::File {
            return None;
        }
        if !self.name.to_ascii_lowercase().ends_with(".md") {
            return None;
        }
        let download_url = self.download_url.clone()?;
        Some(MarkdownSource {
            name: self.name.clone(),
            download_url,
        })
    }
}
