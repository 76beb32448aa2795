//! 5. ISO/IEC 17025 technical requirements.

use crate::work_order::identifiers::OtIdentifiers;
use crate::work_order::layout::LayoutMode;
use crate::work_order::models::WorkOrderRecord;
use crate::work_order::primitives::{banner_row, label_value_row, para, split, text};
use crate::work_order::theme::{IsoValue, StyleTheme};
use crate::work_order::tree::{SectionKind, SectionNode};

pub fn build(
    record: &WorkOrderRecord,
    _ids: &OtIdentifiers,
    theme: &StyleTheme,
    _mode: LayoutMode,
) -> SectionNode {
    let label = &theme.text.titles.iso;
    let grid = split(theme.content_width(), &[35, 65]);
    let widths = (grid[0], grid[1]);

    let mut section = SectionNode::new(SectionKind::IsoRequirements, label, grid);
    section.banner = Some(banner_row(theme, label, section.width, 2));
    section.body = theme
        .text
        .iso_rows
        .iter()
        .map(|row| {
            let value = match &row.value {
                IsoValue::Fixed(fixed) => fixed.clone(),
                IsoValue::Equipment => theme.join_list(&record.equipos),
                IsoValue::InstalledComponent => {
                    theme.or_empty(record.descripcion_componente.as_deref())
                }
            };
            label_value_row(
                theme,
                &row.label,
                theme.type_scale.label,
                para(text(theme, value).size(theme.type_scale.value)),
                widths,
            )
        })
        .collect();
    section
}
