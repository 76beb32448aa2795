//! Work order composition engine.
//!
//! Turns an approved service record into a fixed-layout work order document:
//! - `identifiers` derives the OT number, case file and document-control code
//! - `layout` picks the itemized or compact service table
//! - `sections` builds each table fragment from the record and the theme
//! - `assembler` orders the fragments into a [`tree::DocumentTree`]
//! - `generator` applies the approval gate and hands the tree to a renderer

pub mod assembler;
pub mod common;
pub mod generator;
pub mod identifiers;
pub mod layout;
pub mod models;
pub mod primitives;
pub mod sections;
pub mod theme;
pub mod traits;
pub mod tree;
pub mod validation;

pub use generator::WorkOrderGenerator;
pub use identifiers::OtIdentifiers;
pub use layout::LayoutMode;
pub use models::{LineItem, WorkOrderRecord};
pub use theme::StyleTheme;
pub use traits::{Generator, Validator};

use std::path::PathBuf;

use thiserror::Error;

use crate::render::RenderError;
use theme::ThemeError;

/// Errors that can occur during work order generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error("failed to load theme: {0}")]
    Theme(#[source] ThemeError),
    #[error("failed to render document: {0}")]
    Render(#[source] RenderError),
    #[error("failed to create output directory: {0}")]
    CreateOutputDir(#[source] std::io::Error),
    #[error("failed to write document: {0}")]
    WriteOutput(#[source] std::io::Error),
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),
}

/// Result of a successful document generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub identifiers: OtIdentifiers,
    pub mode: LayoutMode,
}

/// What a generation call produced.
///
/// A record that is not approved is a valid terminal outcome, not an error.
#[derive(Debug)]
pub enum GenerationOutcome {
    Generated(GeneratedDocument),
    NotApproved { numero_proforma: String },
}

impl GenerationOutcome {
    pub fn into_document(self) -> Option<GeneratedDocument> {
        match self {
            GenerationOutcome::Generated(doc) => Some(doc),
            GenerationOutcome::NotApproved { .. } => None,
        }
    }
}
