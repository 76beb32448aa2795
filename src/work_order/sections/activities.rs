//! 4. Technical activities checklist.

use crate::work_order::identifiers::OtIdentifiers;
use crate::work_order::layout::LayoutMode;
use crate::work_order::models::WorkOrderRecord;
use crate::work_order::primitives::{banner_row, blank, cell, para, para_runs, text};
use crate::work_order::theme::StyleTheme;
use crate::work_order::tree::{RowNode, SectionKind, SectionNode};

pub fn build(
    record: &WorkOrderRecord,
    _ids: &OtIdentifiers,
    theme: &StyleTheme,
    _mode: LayoutMode,
) -> SectionNode {
    let p = &theme.palette;
    let ts = &theme.type_scale;
    let t = &theme.text;
    let width = theme.content_width();
    let label = &t.titles.activities;

    let mut paragraphs = vec![para(
        text(theme, &t.activities_intro)
            .size(ts.label)
            .color(&p.gray)
            .italic(),
    )
    .after(120)];

    paragraphs.extend(
        record
            .actividades_incluidas
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(|activity| {
                para_runs(vec![
                    text(theme, &t.checkbox).size(ts.checkbox).color(&p.primary),
                    text(theme, activity).size(ts.value),
                ])
                .before(100)
            }),
    );

    paragraphs.push(blank(theme, 140));
    paragraphs.push(para_runs(vec![
        text(theme, &t.checkbox).size(ts.checkbox).color(&p.gray),
        text(theme, &t.trailing_activity)
            .size(ts.label)
            .color(&p.gray)
            .italic(),
    ]));

    let mut section = SectionNode::new(SectionKind::TechnicalActivities, label, vec![width]);
    section.banner = Some(banner_row(theme, label, width, 1));
    section
        .body
        .push(RowNode::new(vec![cell(theme, width, paragraphs)]));
    section
}
