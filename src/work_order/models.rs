//! Input model for work order generation.
//!
//! Field names follow the JSON emitted by the proforma extractor, so a record
//! can be fed straight from its output.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One line of the proforma item table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LineItem {
    #[schema(example = 1)]
    pub item: u32,
    #[schema(example = 2.0)]
    pub cantidad: f64,
    /// Unit of measure (UND, NIU, ZZ, GLB). Rendered as "UND" when absent.
    #[serde(default)]
    #[schema(example = "UND")]
    pub um: Option<String>,
    #[schema(example = "CALIBRACION DE MICROMETRO IM-012 / MAESTRANZA")]
    pub descripcion: String,
}

impl LineItem {
    pub fn new(item: u32, cantidad: f64, um: Option<&str>, descripcion: &str) -> Self {
        Self {
            item,
            cantidad,
            um: um.map(str::to_string),
            descripcion: descripcion.to_string(),
        }
    }

    /// Quantity as the proforma prints it: `2` for whole values, `1.5` otherwise.
    pub fn quantity_label(&self) -> String {
        if self.cantidad.fract() == 0.0 && self.cantidad.abs() < 1e15 {
            format!("{}", self.cantidad as i64)
        } else {
            format!("{}", self.cantidad)
        }
    }
}

/// Approved service order record, immutable for the duration of a generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct WorkOrderRecord {
    // Client identity
    #[serde(default)]
    #[schema(example = "20100047218")]
    pub ruc_cliente: String,
    #[serde(default)]
    #[schema(example = "INDUSTRIAS ANDINAS S.A.C.")]
    pub cliente: String,
    #[serde(default)]
    pub direccion_cliente: String,
    #[serde(default)]
    pub contacto_cliente: String,
    #[serde(default)]
    pub telefono_cliente: String,
    #[serde(default)]
    pub email_cliente: String,

    // Commercial metadata
    #[serde(default)]
    #[schema(example = "P001-2041")]
    pub numero_proforma: String,
    /// Issue date as `DD/MM/YYYY`.
    #[serde(default)]
    #[schema(example = "15/03/2026")]
    pub fecha_emision: Option<String>,
    #[serde(default)]
    #[schema(example = "5 a 7 DIAS")]
    pub plazo_entrega: String,
    pub aprobada: bool,
    #[serde(default)]
    pub forma_pago: Option<String>,

    // Service content
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Declared item count. Decides the layout even when it disagrees with `items`.
    #[serde(default)]
    pub total_items: Option<u32>,
    #[serde(default)]
    pub alcance_servicio: Option<String>,
    #[serde(default)]
    pub equipos: Vec<String>,
    #[serde(default)]
    pub descripcion_componente: Option<String>,
    #[serde(default)]
    pub tipo_servicio: Option<String>,
    #[serde(default)]
    pub descripcion_servicio: Option<String>,

    // Technical checklist
    #[serde(default)]
    pub actividades_incluidas: Vec<String>,

    // Issuing laboratory
    #[serde(default)]
    pub laboratorio: Option<String>,
    #[serde(default)]
    pub ruc_laboratorio: Option<String>,
}

impl WorkOrderRecord {
    /// Declared total, falling back to the list length when absent or zero.
    pub fn declared_total(&self) -> usize {
        match self.total_items {
            Some(total) if total > 0 => total as usize,
            _ => self.items.len(),
        }
    }

    /// Issue date with surrounding whitespace removed, `None` when blank.
    pub fn issue_date(&self) -> Option<&str> {
        self.fecha_emision
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Service type for audit purposes.
    pub fn service_type(&self) -> &str {
        self.tipo_servicio
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("GENERAL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record_deserialization() {
        let json = r#"{
            "aprobada": true,
            "fecha_emision": "15/03/2026",
            "items": [{"item": 1, "cantidad": 2, "descripcion": "Balanza X"}],
            "total_items": 1
        }"#;

        let record: WorkOrderRecord = serde_json::from_str(json).unwrap();
        assert!(record.aprobada);
        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].um, None);
        assert_eq!(record.declared_total(), 1);
        assert!(record.equipos.is_empty());
    }

    #[test]
    fn test_missing_approval_flag_is_rejected() {
        let json = r#"{ "cliente": "ACME" }"#;
        let result: Result<WorkOrderRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_declared_total_falls_back_to_list_length() {
        let mut record = WorkOrderRecord {
            aprobada: true,
            items: (1..=6)
                .map(|i| LineItem::new(i, 1.0, Some("UND"), "Manometro"))
                .collect(),
            ..Default::default()
        };
        assert_eq!(record.declared_total(), 6);

        record.total_items = Some(0);
        assert_eq!(record.declared_total(), 6);

        record.total_items = Some(2);
        assert_eq!(record.declared_total(), 2);
    }

    #[test]
    fn test_quantity_label() {
        assert_eq!(LineItem::new(1, 2.0, None, "x").quantity_label(), "2");
        assert_eq!(LineItem::new(1, 1.5, None, "x").quantity_label(), "1.5");
    }

    #[test]
    fn test_blank_issue_date_is_none() {
        let record = WorkOrderRecord {
            fecha_emision: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(record.issue_date(), None);
        assert_eq!(record.service_type(), "GENERAL");
    }
}
