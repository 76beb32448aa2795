//! Rendering of composed document trees into files.
//!
//! - `docx` - serializes a [`DocumentTree`] to an Office Open XML package
//! - `pdf` - converts a finished `.docx` to PDF through LibreOffice

pub mod docx;
pub mod pdf;

pub use docx::DocxRenderer;
pub use pdf::{ConvertError, DocumentConverter, SofficeConverter};

use thiserror::Error;

use crate::work_order::tree::DocumentTree;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to package document: {0}")]
    Pack(String),
    #[error("unsupported image: {0}")]
    Image(String),
}

/// Turns a composed tree into the bytes of a file.
pub trait DocumentRenderer: Send + Sync {
    /// File extension of the produced format, without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, tree: &DocumentTree) -> Result<Vec<u8>, RenderError>;
}
