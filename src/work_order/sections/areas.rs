//! 3. Responsible areas and coordinator assignment.

use crate::work_order::identifiers::OtIdentifiers;
use crate::work_order::layout::LayoutMode;
use crate::work_order::models::WorkOrderRecord;
use crate::work_order::primitives::{banner_row, cell, even_split, para, text};
use crate::work_order::theme::StyleTheme;
use crate::work_order::tree::{CellNode, ParagraphNode, RowNode, SectionKind, SectionNode};

pub fn build(
    _record: &WorkOrderRecord,
    ids: &OtIdentifiers,
    theme: &StyleTheme,
    _mode: LayoutMode,
) -> SectionNode {
    let p = &theme.palette;
    let ts = &theme.type_scale;
    let t = &theme.text;
    let label = &t.titles.areas;
    let grid = even_split(theme.content_width(), 2);

    let block = |width: u32, title: &str, value: ParagraphNode| -> CellNode {
        cell(
            theme,
            width,
            vec![
                para(text(theme, title).size(ts.label).color(&p.primary).bold()),
                value,
            ],
        )
    };
    let email = |address: &str| {
        para(text(theme, address).size(ts.label).color(&p.accent)).before(60)
    };
    let blank_line = |content: String| para(text(theme, content).size(ts.value)).before(80);

    let mut section = SectionNode::new(SectionKind::ResponsibleAreas, label, grid.clone());
    section.banner = Some(banner_row(theme, label, section.width, 2));
    section.body = vec![
        RowNode::new(vec![
            block(grid[0], &t.executing_area_label, email(&theme.company.lab_email))
                .shade(&p.light_blue),
            block(grid[1], &t.quality_area_label, email(&theme.company.quality_email))
                .shade(&p.light_blue),
        ]),
        RowNode::new(vec![
            block(grid[0], &t.coordinator_label, blank_line(t.signature_line.clone())),
            block(
                grid[1],
                &t.assignment_date_label,
                blank_line(format!("______ / ______ / {}", ids.year)),
            ),
        ]),
    ];
    section
}
