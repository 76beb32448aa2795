//! Work order generator: approval gate, identifiers, layout, assembly and rendering.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use log::{debug, info, warn};

use super::assembler::compose;
use super::common::document_filename;
use super::identifiers::OtIdentifiers;
use super::layout::LayoutMode;
use super::models::WorkOrderRecord;
use super::theme::StyleTheme;
use super::traits::{Generator, Validator};
use super::tree::DocumentTree;
use super::validation::{missing_recommended, validate_items, ValidationErrors};
use super::{GeneratedDocument, GenerationOutcome, GeneratorError};
use crate::render::{DocumentRenderer, DocxRenderer};

impl Validator for WorkOrderRecord {
    /// Check the data the document cannot do without.
    fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();
        validate_items(self, &mut errors);
        errors.into_result()
    }
}

/// Generator for approved work orders.
pub struct WorkOrderGenerator {
    theme: StyleTheme,
    logo: Option<Vec<u8>>,
    renderer: Box<dyn DocumentRenderer>,
    clock: fn() -> DateTime<Local>,
}

impl WorkOrderGenerator {
    /// Create a generator rendering to DOCX.
    pub fn new(theme: StyleTheme, logo: Option<Vec<u8>>) -> Self {
        Self::with_renderer(theme, logo, Box::new(DocxRenderer))
    }

    pub fn with_renderer(
        theme: StyleTheme,
        logo: Option<Vec<u8>>,
        renderer: Box<dyn DocumentRenderer>,
    ) -> Self {
        Self {
            theme,
            logo,
            renderer,
            clock: Local::now,
        }
    }

    /// Replace the wall clock used by [`Generator::generate`].
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    /// Build from an optional theme file and a logo path.
    ///
    /// A missing logo is not fatal: the header is rendered without it.
    pub fn from_paths(theme_path: Option<&Path>, logo_path: &Path) -> Result<Self, GeneratorError> {
        let theme = match theme_path {
            Some(path) => {
                info!("Loading theme from {}", path.display());
                StyleTheme::load(path).map_err(GeneratorError::Theme)?
            }
            None => StyleTheme::metromecanica(),
        };

        let logo = match fs::read(logo_path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(
                    "Logo not available at {} ({}), header will be text only",
                    logo_path.display(),
                    e
                );
                None
            }
        };

        Ok(Self::new(theme, logo))
    }

    pub fn theme(&self) -> &StyleTheme {
        &self.theme
    }

    pub fn logo(&self) -> Option<&[u8]> {
        self.logo.as_deref()
    }

    /// Identifiers, layout mode and document tree for `record` at `now`.
    ///
    /// Pure apart from the clock value passed in.
    pub fn compose_at<Tz: TimeZone>(
        &self,
        record: &WorkOrderRecord,
        now: &DateTime<Tz>,
    ) -> (OtIdentifiers, LayoutMode, DocumentTree) {
        let ids = OtIdentifiers::derive(record.issue_date(), now);
        let mode = LayoutMode::for_record(record);
        debug!(
            "Composing {} with {} layout ({} declared items)",
            ids.ot_number,
            mode.as_str(),
            record.declared_total()
        );
        let tree = compose(record, &ids, &self.theme, mode, self.logo());
        (ids, mode, tree)
    }

    /// Run the full pipeline with an explicit clock.
    pub fn generate_at<Tz: TimeZone>(
        &self,
        record: &WorkOrderRecord,
        now: &DateTime<Tz>,
    ) -> Result<GenerationOutcome, GeneratorError> {
        if !record.aprobada {
            debug!("Proforma {} not approved", record.numero_proforma);
            return Ok(GenerationOutcome::NotApproved {
                numero_proforma: record.numero_proforma.clone(),
            });
        }

        Validator::validate(record).map_err(GeneratorError::InvalidRecord)?;
        let missing = missing_recommended(record);
        if !missing.is_empty() {
            warn!("Record is missing recommended fields: {}", missing.join(", "));
        }

        let (identifiers, mode, tree) = self.compose_at(record, now);
        let bytes = self.renderer.render(&tree).map_err(GeneratorError::Render)?;

        info!(
            "Generated {} ({} bytes, {} layout)",
            identifiers.ot_number,
            bytes.len(),
            mode.as_str()
        );

        Ok(GenerationOutcome::Generated(GeneratedDocument {
            filename: document_filename(&identifiers.ot_number, self.renderer.extension()),
            bytes,
            identifiers,
            mode,
        }))
    }
}

impl Generator<WorkOrderRecord> for WorkOrderGenerator {
    fn generate(&self, request: &WorkOrderRecord) -> Result<GenerationOutcome, GeneratorError> {
        self.generate_at(request, &(self.clock)())
    }
}

impl GeneratedDocument {
    /// Write the document under `dir`, creating it on demand.
    ///
    /// An existing file with the same OT number is never replaced.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, GeneratorError> {
        fs::create_dir_all(dir).map_err(GeneratorError::CreateOutputDir)?;
        let path = dir.join(&self.filename);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(GeneratorError::AlreadyExists(path))
            }
            Err(e) => return Err(GeneratorError::WriteOutput(e)),
        };
        file.write_all(&self.bytes)
            .map_err(GeneratorError::WriteOutput)?;
        Ok(path)
    }
}
