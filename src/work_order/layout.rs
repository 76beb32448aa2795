//! Layout selection for the service-description table.

use serde::Serialize;
use utoipa::ToSchema;

use super::models::WorkOrderRecord;

/// Largest declared item count still rendered item by item.
pub const ITEMIZED_MAX_ITEMS: usize = 3;

/// How the line items are laid out in the service description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// One row per item with its description and the overall scope note.
    Itemized,
    /// Dense zebra-striped rows plus one aggregated scope row.
    Compact,
}

impl LayoutMode {
    /// Decide the mode from the declared total alone. A declared total of three
    /// or less with no items yields itemized mode with zero item rows.
    pub fn select(declared_total: usize) -> Self {
        if declared_total <= ITEMIZED_MAX_ITEMS {
            LayoutMode::Itemized
        } else {
            LayoutMode::Compact
        }
    }

    /// Mode for a record. With neither a declared total nor any item there is
    /// nothing to itemize, so the compact table keeps its scope row.
    pub fn for_record(record: &WorkOrderRecord) -> Self {
        match record.declared_total() {
            0 => LayoutMode::Compact,
            total => Self::select(total),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Itemized => "itemized",
            LayoutMode::Compact => "compact",
        }
    }
}
