//! Section builders.
//!
//! Each builder is a pure function of the record, its identifiers, the theme
//! and the layout mode, and returns one self-contained table fragment.

pub mod activities;
pub mod areas;
pub mod commercial;
pub mod header;
pub mod iso_requirements;
pub mod observations;
pub mod service;
pub mod signatures;

use super::identifiers::OtIdentifiers;
use super::layout::LayoutMode;
use super::models::WorkOrderRecord;
use super::theme::StyleTheme;
use super::tree::SectionNode;

pub type SectionBuilder =
    fn(&WorkOrderRecord, &OtIdentifiers, &StyleTheme, LayoutMode) -> SectionNode;

/// Body sections in document order.
pub const BODY_SECTIONS: [SectionBuilder; 7] = [
    commercial::build,
    observations::build,
    service::build,
    areas::build,
    activities::build,
    iso_requirements::build,
    signatures::build,
];
