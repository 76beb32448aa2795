use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::work_order::{GeneratedDocument, WorkOrderRecord};

/// Approval override chosen by the operator.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProcessQuery {
    /// `aprobada` or `rechazada`. Absent keeps the record's own flag.
    pub estado: Option<String>,
}

impl ProcessQuery {
    /// Approval flag requested through `estado`, `Err` with the raw value when unknown.
    pub fn approval(&self) -> Result<Option<bool>, String> {
        match self.estado.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(v) if v.eq_ignore_ascii_case("aprobada") => Ok(Some(true)),
            Some(v) if v.eq_ignore_ascii_case("rechazada") => Ok(Some(false)),
            Some(other) => Err(other.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, PartialEq)]
pub struct ProcessResponse {
    pub aprobada: bool,
    #[schema(example = "P001-2041")]
    pub numero_proforma: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "OT-2026-0123")]
    pub ot_num: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "OT-2026-0123.docx")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_emision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacto_cliente: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plazo_entrega: Option<String>,
    /// Layout used for the service table: `itemized` or `compact`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modo: Option<String>,
}

impl ProcessResponse {
    pub fn rejected(numero_proforma: &str) -> Self {
        Self {
            aprobada: false,
            numero_proforma: numero_proforma.to_string(),
            ot_num: None,
            filename: None,
            cliente: None,
            equipos: None,
            fecha_emision: None,
            contacto_cliente: None,
            plazo_entrega: None,
            modo: None,
        }
    }

    pub fn generated(record: &WorkOrderRecord, doc: &GeneratedDocument) -> Self {
        Self {
            aprobada: true,
            numero_proforma: record.numero_proforma.clone(),
            ot_num: Some(doc.identifiers.ot_number.clone()),
            filename: Some(doc.filename.clone()),
            cliente: Some(record.cliente.clone()),
            equipos: Some(record.equipos.clone()),
            fecha_emision: Some(record.issue_date().unwrap_or_default().to_string()),
            contacto_cliente: Some(record.contacto_cliente.clone()),
            plazo_entrega: Some(record.plazo_entrega.clone()),
            modo: Some(doc.mode.as_str().to_string()),
        }
    }
}
