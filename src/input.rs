//! Acquisition of a work order record from the command line.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::work_order::WorkOrderRecord;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),
    #[error("invalid record JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("{0}")]
    Validation(String),
    #[error("Uso: metromecanica-ot '<json>' | --file data.json | --stdin")]
    NoInput,
}

/// Where the record comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl RecordSource {
    /// Pick the source from the CLI arguments. Stdin wins over a file, a file over inline JSON.
    pub fn from_args(
        inline: Option<String>,
        file: Option<PathBuf>,
        stdin: bool,
    ) -> Result<Self, InputError> {
        if stdin {
            return Ok(RecordSource::Stdin);
        }
        if let Some(path) = file {
            return Ok(RecordSource::File(path));
        }
        match inline {
            Some(json) if json.trim_start().starts_with('{') => Ok(RecordSource::Inline(json)),
            _ => Err(InputError::NoInput),
        }
    }

    pub fn read(&self) -> Result<WorkOrderRecord, InputError> {
        match self {
            RecordSource::Inline(json) => parse_record(json),
            RecordSource::File(path) => read_file(path),
            RecordSource::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(InputError::Read)?;
                parse_record(&buf)
            }
        }
    }
}

fn read_file(path: &Path) -> Result<WorkOrderRecord, InputError> {
    let json = fs::read_to_string(path).map_err(InputError::Read)?;
    parse_record(&json)
}

/// Parse a record, reporting a missing `aprobada` flag as a validation failure.
pub fn parse_record(json: &str) -> Result<WorkOrderRecord, InputError> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(InputError::Parse)?;
    if value.get("aprobada").and_then(|v| v.as_bool()).is_none() {
        return Err(InputError::Validation(
            "[aprobada] El campo 'aprobada' es obligatorio y debe ser true o false".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(InputError::Parse)
}
