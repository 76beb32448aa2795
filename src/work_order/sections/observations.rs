//! Free-form observations box, left blank for handwriting.

use crate::work_order::identifiers::OtIdentifiers;
use crate::work_order::layout::LayoutMode;
use crate::work_order::models::WorkOrderRecord;
use crate::work_order::primitives::{banner_row, blank, cell, para, text};
use crate::work_order::theme::StyleTheme;
use crate::work_order::tree::{RowNode, SectionKind, SectionNode};

pub fn build(
    _record: &WorkOrderRecord,
    _ids: &OtIdentifiers,
    theme: &StyleTheme,
    _mode: LayoutMode,
) -> SectionNode {
    let width = theme.content_width();
    let label = &theme.text.titles.observations;

    let mut paragraphs = vec![para(
        text(theme, &theme.text.observations_hint)
            .size(theme.type_scale.small)
            .color(&theme.palette.gray)
            .italic(),
    )
    .after(80)];
    paragraphs.extend(
        (0..theme.text.observations_blank_lines).map(|_| blank(theme, theme.type_scale.value)),
    );

    let mut section = SectionNode::new(SectionKind::Observations, label, vec![width]);
    section.banner = Some(banner_row(theme, label, width, 1));
    section.body.push(RowNode::new(vec![
        cell(theme, width, paragraphs).shade(&theme.palette.off_white),
    ]));
    section
}
