//! Input validation for work order records.
//!
//! Only existence of required data is checked here. Business rules belong to
//! the proforma workflow upstream.

use std::fmt;

use super::models::WorkOrderRecord;

/// Validation error with a user-facing message in Spanish.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    pub message: String,
    /// Suggestion for how to fix the error
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} no puede estar vacío", label)).with_suggestion(format!(
            "Complete {} con un valor válido",
            label.to_lowercase()
        ))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Multi-line message listing every error, suitable for CLI and HTTP responses.
    pub fn to_message(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }

        let mut parts = vec![format!(
            "Validación fallida: {} error(es) encontrado(s)\n",
            self.errors.len()
        )];

        for (i, error) in self.errors.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, error));
        }

        parts.push(String::new());
        parts.push("Corrija los datos indicados e intente nuevamente.".to_string());

        parts.join("\n")
    }

    /// Ok if no errors, Err with the formatted message otherwise.
    pub fn into_result(self) -> Result<(), String> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.to_message())
        }
    }
}

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Validate every line item of a record.
pub fn validate_items(record: &WorkOrderRecord, errors: &mut ValidationErrors) {
    for (idx, item) in record.items.iter().enumerate() {
        validate_required(
            &item.descripcion,
            &format!("items[{}].descripcion", idx),
            "Descripción del ítem",
            errors,
        );
    }
}

/// Fields that are not required but leave visible gaps in the document.
pub fn missing_recommended(record: &WorkOrderRecord) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if record.ruc_cliente.trim().is_empty() {
        missing.push("ruc_cliente");
    }
    if record.cliente.trim().is_empty() {
        missing.push("cliente");
    }
    if record.numero_proforma.trim().is_empty() {
        missing.push("numero_proforma");
    }
    if record.issue_date().is_none() {
        missing.push("fecha_emision");
    }
    missing
}
