use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::work_order::{OtIdentifiers, WorkOrderRecord};

/// Timestamp layout stored in `audit_log.timestamp`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Stored audit log row.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, sqlx::FromRow, PartialEq)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: String,
    pub ot_number: String,
    pub expediente: String,
    pub proforma_number: String,
    pub cliente: String,
    pub ruc_cliente: String,
    pub total_items: i64,
    pub tipo_servicio: Option<String>,
    pub fecha_emision: Option<String>,
    pub fecha_entrega: Option<String>,
    pub estado: Option<String>,
    pub usuario: Option<String>,
    pub ip_address: Option<String>,
    pub filepath: Option<String>,
    pub metadata: Option<String>,
}

/// Data registered for a freshly generated OT.
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub timestamp: NaiveDateTime,
    pub ot_number: String,
    pub expediente: String,
    pub proforma_number: String,
    pub cliente: String,
    pub ruc_cliente: String,
    pub total_items: i64,
    pub tipo_servicio: String,
    pub fecha_emision: String,
    pub fecha_entrega: String,
    pub ip_address: Option<String>,
    pub metadata: serde_json::Value,
}

impl NewAuditEntry {
    pub fn from_generation(
        record: &WorkOrderRecord,
        ids: &OtIdentifiers,
        timestamp: NaiveDateTime,
    ) -> Self {
        let metadata = json!({
            "ot_number": ids.ot_number,
            "expediente": ids.expediente,
            "codigo_doc": ids.codigo_doc,
            "numero_proforma": record.numero_proforma,
            "cliente": record.cliente,
            "ruc_cliente": record.ruc_cliente,
            "total_items": record.declared_total(),
            "tipo_servicio": record.service_type(),
            "fecha_emision": record.issue_date().unwrap_or_default(),
            "plazo_entrega": record.plazo_entrega,
            "forma_pago": record.forma_pago,
            "descripcion_servicio": record.descripcion_servicio,
            "laboratorio": record.laboratorio,
            "ruc_laboratorio": record.ruc_laboratorio,
        });

        Self {
            timestamp,
            ot_number: ids.ot_number.clone(),
            expediente: ids.expediente.clone(),
            proforma_number: record.numero_proforma.clone(),
            cliente: record.cliente.clone(),
            ruc_cliente: record.ruc_cliente.clone(),
            total_items: record.declared_total() as i64,
            tipo_servicio: record.service_type().to_string(),
            fecha_emision: record.issue_date().unwrap_or_default().to_string(),
            fecha_entrega: record.plazo_entrega.clone(),
            ip_address: None,
            metadata,
        }
    }

    pub fn with_ip_address(mut self, ip: Option<String>) -> Self {
        self.ip_address = ip;
        self
    }

    pub fn timestamp_text(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Query filter for audit entries. Dates are inclusive.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AuditFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cliente: Option<String>,
}

impl AuditFilter {
    /// The `days` days up to and including `today`.
    pub fn last_days(today: NaiveDate, days: i64) -> Self {
        Self {
            start_date: Some(today - chrono::Duration::days(days)),
            end_date: Some(today),
            cliente: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, sqlx::FromRow, PartialEq)]
pub struct MonthCount {
    #[schema(example = "2026-03")]
    pub mes: String,
    pub cantidad: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, sqlx::FromRow, PartialEq)]
pub struct ServiceTypeCount {
    pub tipo_servicio: Option<String>,
    pub cantidad: i64,
}

/// Aggregates reported to the accreditation body.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, PartialEq)]
pub struct AuditStats {
    pub total_ots: i64,
    pub por_mes: Vec<MonthCount>,
    pub clientes_unicos: i64,
    pub por_tipo: Vec<ServiceTypeCount>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::work_order::sections::fixtures;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 15)
            .unwrap()
            .and_hms_micro_opt(9, 30, 0, 125_000)
            .unwrap()
    }

    #[test]
    fn test_entry_from_generation() {
        let record = fixtures::record();
        let entry = NewAuditEntry::from_generation(&record, &fixtures::ids(), timestamp());

        assert_eq!(entry.ot_number, "OT-2026-0123");
        assert_eq!(entry.proforma_number, "P001-2041");
        assert_eq!(entry.total_items, 1);
        assert_eq!(entry.tipo_servicio, "GENERAL");
        assert_eq!(entry.fecha_emision, "15/03/2026");
        assert_eq!(entry.fecha_entrega, "5 a 7 DIAS");
        assert_eq!(entry.metadata["codigo_doc"], "RTL-01/Ed02-2026/LAB");
    }

    #[test]
    fn test_timestamp_text() {
        let entry =
            NewAuditEntry::from_generation(&fixtures::record(), &fixtures::ids(), timestamp());
        assert_eq!(entry.timestamp_text(), "2026-03-15T09:30:00.125000");
    }

    #[test]
    fn test_last_days_filter() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let filter = AuditFilter::last_days(today, 365);
        assert_eq!(filter.start_date, NaiveDate::from_ymd_opt(2025, 3, 15));
        assert_eq!(filter.end_date, Some(today));
    }
}
