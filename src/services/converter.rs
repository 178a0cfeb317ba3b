//! Conversion Invoker
//!
//! Persists the assembled book into the request workspace, runs the external
//! converter once, and reads the produced PDF back into memory.

use std::io;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;

use crate::services::workspace::{Workspace, WorkspaceError};

const INPUT_NAME: &str = "book.md";
const OUTPUT_NAME: &str = "book.pdf";

/// Errors that can occur while producing the PDF
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to launch converter '{bin}': {source}")]
    Launch {
        bin: String,
        #[source]
        source: io::Error,
    },

    /// Non-zero exit; carries the converter's stderr verbatim
    #[error("{detail}")]
    Failed { detail: String },

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
}

/// Runs the converter binary configured at startup
#[derive(Debug, Clone)]
pub struct Converter {
    bin: String,
}

impl Converter {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    /// Render `body` to a PDF inside `workspace` and return its bytes.
    ///
    /// The table of contents, the rendering engine and the fallback font are
    /// fixed so the output does not depend on host configuration. Stdout is
    /// discarded; stderr is captured for the error report. The child is
    /// killed if the request is dropped mid-conversion.
    pub async fn render_pdf(
        &self,
        workspace: &Workspace,
        body: &str,
    ) -> Result<Vec<u8>, ConvertError> {
        let input = workspace.write_text(INPUT_NAME, body).await?;
        let output_path = workspace.file_path(OUTPUT_NAME);

        let output = Command::new(&self.bin)
            .arg(&input)
            .arg("-o")
            .arg(&output_path)
            .arg("--toc")
            .arg("--pdf-engine=xelatex")
            .arg("-V")
            .arg("mainfont=DejaVu Sans")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ConvertError::Launch {
                bin: self.bin.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            let detail = if stderr.trim().is_empty() {
                match output.status.code() {
                    Some(code) => format!("converter exited with status {code}"),
                    None => "converter was terminated by a signal".to_string(),
                }
            } else {
                stderr
            };
            return Err(ConvertError::Failed { detail });
        }

        Ok(workspace.read_bytes(OUTPUT_NAME).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn fake_converter(dir: &std::path::Path, script: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-pandoc");
        std::fs::write(&path, script).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn returns_the_output_file_bytes_on_success() {
        let scripts = tempfile::tempdir().unwrap();
        // Copies the input file to the path given after `-o`.
        let bin = fake_converter(scripts.path(), "#!/bin/sh\ncp \"$1\" \"$3\"\n");

        let workspace = Workspace::create().await.unwrap();
        let pdf = Converter::new(bin)
            .render_pdf(&workspace, "# Title")
            .await
            .unwrap();

        assert_eq!(pdf, b"# Title");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_surfaces_the_diagnostic_verbatim() {
        let scripts = tempfile::tempdir().unwrap();
        let bin = fake_converter(
            scripts.path(),
            "#!/bin/sh\nprintf 'font not found' >&2\nexit 1\n",
        );

        let workspace = Workspace::create().await.unwrap();
        let err = Converter::new(bin)
            .render_pdf(&workspace, "body")
            .await
            .unwrap_err();

        match err {
            ConvertError::Failed { detail } => assert_eq!(detail, "font not found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn empty_diagnostics_fall_back_to_the_exit_status() {
        let scripts = tempfile::tempdir().unwrap();
        let bin = fake_converter(scripts.path(), "#!/bin/sh\nexit 3\n");

        let workspace = Workspace::create().await.unwrap();
        let err = Converter::new(bin)
            .render_pdf(&workspace, "body")
            .await
            .unwrap_err();

        match err {
            ConvertError::Failed { detail } => {
                assert_eq!(detail, "converter exited with status 3")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn passes_toc_engine_and_font_flags() {
        let scripts = tempfile::tempdir().unwrap();
        // Records its arguments into the output file.
        let bin = fake_converter(scripts.path(), "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$3\"\n");

        let workspace = Workspace::create().await.unwrap();
        let recorded = Converter::new(bin)
            .render_pdf(&workspace, "body")
            .await
            .unwrap();
        let recorded = String::from_utf8(recorded).unwrap();

        assert!(recorded.contains("--toc"));
        assert!(recorded.contains("--pdf-engine=xelatex"));
        assert!(recorded.contains("mainfont=DejaVu Sans"));
    }

    #[tokio::test]
    async fn a_missing_binary_is_a_launch_error() {
        let workspace = Workspace::create().await.unwrap();
        let err = Converter::new("definitely-not-a-real-converter")
            .render_pdf(&workspace, "body")
            .await
            .unwrap_err();

        assert!(matches!(err, ConvertError::Launch { .. }));
    }
}
