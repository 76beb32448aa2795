//! PDF conversion of generated `.docx` files through headless LibreOffice.
//!
//! The converter copies the source into a scratch directory, runs
//! `soffice --headless --convert-to pdf` there and reads the result back, so
//! concurrent conversions never share an output path.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use tempfile::tempdir;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] io::Error),
    #[error("I/O error during conversion: {0}")]
    Io(#[source] io::Error),
    #[error("converter exited with status {0}")]
    Exit(i32),
    #[error("conversion timed out after {0:?}")]
    Timeout(Duration),
    #[error("converter binary not installed: {0}")]
    NotInstalled(String),
    #[error("converter produced no output file")]
    MissingOutput,
}

/// Converts a finished document into PDF bytes.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn to_pdf(&self, source: &Path) -> Result<Vec<u8>, ConvertError>;
}

/// LibreOffice-backed converter.
#[derive(Debug, Clone)]
pub struct SofficeConverter {
    binary: String,
    timeout: Duration,
}

impl SofficeConverter {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for SofficeConverter {
    fn default() -> Self {
        Self::new("soffice", Duration::from_secs(30))
    }
}

/// Name LibreOffice gives the converted file.
pub fn pdf_name_for(source: &Path) -> Option<PathBuf> {
    let stem = source.file_stem()?;
    Some(PathBuf::from(stem).with_extension("pdf"))
}

#[async_trait]
impl DocumentConverter for SofficeConverter {
    async fn to_pdf(&self, source: &Path) -> Result<Vec<u8>, ConvertError> {
        let work_dir = tempdir().map_err(ConvertError::TempDir)?;
        let file_name = source.file_name().ok_or(ConvertError::MissingOutput)?;
        let input = work_dir.path().join(file_name);
        tokio::fs::copy(source, &input)
            .await
            .map_err(ConvertError::Io)?;

        debug!("Converting {} with {}", source.display(), self.binary);

        let mut command = Command::new(&self.binary);
        command
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(work_dir.path())
            .arg(&input)
            .current_dir(work_dir.path())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Err(_) => {
                error!("PDF conversion of {} timed out", source.display());
                return Err(ConvertError::Timeout(self.timeout));
            }
            Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConvertError::NotInstalled(self.binary.clone()));
            }
            Ok(Err(e)) => return Err(ConvertError::Io(e)),
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            error!(
                "PDF conversion failed ({}): {}",
                code,
                String::from_utf8_lossy(&output.stderr)
            );
            return Err(ConvertError::Exit(code));
        }

        let pdf_path = pdf_name_for(&input)
            .map(|name| work_dir.path().join(name))
            .ok_or(ConvertError::MissingOutput)?;
        match tokio::fs::read(&pdf_path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ConvertError::MissingOutput),
            Err(e) => Err(ConvertError::Io(e)),
        }
    }
}
