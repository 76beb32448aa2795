//! CSV export of the audit log for accreditation review.

use chrono::NaiveDate;
use thiserror::Error;

use super::models::AuditEntry;

/// Byte-order mark so spreadsheet tools detect UTF-8.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const CSV_HEADER: [&str; 11] = [
    "timestamp",
    "ot_number",
    "expediente",
    "proforma_number",
    "cliente",
    "ruc_cliente",
    "total_items",
    "tipo_servicio",
    "fecha_emision",
    "fecha_entrega",
    "estado",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV: {0}")]
    Io(#[from] std::io::Error),
}

/// Download name for an export produced on `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("auditoria_inacal_{}.csv", date.format("%Y-%m-%d"))
}

/// Serialize entries as BOM-prefixed CSV. `None` when there is nothing to export.
pub fn export_audit_csv(entries: &[AuditEntry]) -> Result<Option<Vec<u8>>, ExportError> {
    if entries.is_empty() {
        return Ok(None);
    }

    let mut writer = csv::WriterBuilder::new().from_writer(UTF8_BOM.to_vec());
    writer.write_record(CSV_HEADER)?;

    for entry in entries {
        let total_items = entry.total_items.to_string();
        writer.write_record([
            entry.timestamp.as_str(),
            entry.ot_number.as_str(),
            entry.expediente.as_str(),
            entry.proforma_number.as_str(),
            entry.cliente.as_str(),
            entry.ruc_cliente.as_str(),
            total_items.as_str(),
            entry.tipo_servicio.as_deref().unwrap_or_default(),
            entry.fecha_emision.as_deref().unwrap_or_default(),
            entry.fecha_entrega.as_deref().unwrap_or_default(),
            entry.estado.as_deref().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(Some(bytes))
}
