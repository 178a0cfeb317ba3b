//! Resource Lifecycle Manager
//!
//! Allocates one uniquely named scratch directory per request and removes it
//! when the handle is dropped, on every exit path.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, io};

use thiserror::Error;
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

/// Errors that can occur while using a scratch directory
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("failed to create scratch directory {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Exclusively owned scratch directory, removed on drop
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create a fresh directory under the system temp root. The random
    /// suffix keeps concurrent requests out of each other's files.
    pub async fn create() -> Result<Self, WorkspaceError> {
        let root = env::temp_dir().join(format!("repobook-{}", Uuid::new_v4()));
        fs::create_dir_all(&root)
            .await
            .map_err(|source| WorkspaceError::Create {
                path: root.clone(),
                source,
            })?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a file inside this workspace
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Write text into the workspace and return the file's path
    pub async fn write_text(&self, name: &str, contents: &str) -> Result<PathBuf, WorkspaceError> {
        let path = self.file_path(name);
        fs::write(&path, contents)
            .await
            .map_err(|source| WorkspaceError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    /// Read a file from the workspace fully into memory
    pub async fn read_bytes(&self, name: &str) -> Result<Vec<u8>, WorkspaceError> {
        let path = self.file_path(name);
        fs::read(&path)
            .await
            .map_err(|source| WorkspaceError::Read { path, source })
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        // Cleanup never masks the pipeline outcome. A directory that is
        // already gone or off-limits is left alone without a sound.
        if let Err(err) = std::fs::remove_dir_all(&self.root) {
            match err.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {}
                _ => warn!(
                    path = %self.root.display(),
                    error = %err,
                    "failed to remove scratch directory"
                ),
            }
        }
    }
}
