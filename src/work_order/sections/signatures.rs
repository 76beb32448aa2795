//! 6. Approvals and signatures.

use crate::work_order::identifiers::OtIdentifiers;
use crate::work_order::layout::LayoutMode;
use crate::work_order::models::WorkOrderRecord;
use crate::work_order::primitives::{banner_row, blank, cell, even_split, para, text};
use crate::work_order::theme::{SignatureBox, StyleTheme};
use crate::work_order::tree::{Align, CellNode, RowNode, SectionKind, SectionNode};

pub fn build(
    _record: &WorkOrderRecord,
    _ids: &OtIdentifiers,
    theme: &StyleTheme,
    _mode: LayoutMode,
) -> SectionNode {
    let label = &theme.text.titles.signatures;
    let boxes = &theme.text.signature_boxes;
    let grid = even_split(theme.content_width(), boxes.len());

    let cells = boxes
        .iter()
        .zip(&grid)
        .map(|(sig, width)| signature_box(theme, sig, *width))
        .collect();

    let mut section = SectionNode::new(SectionKind::Signatures, label, grid);
    section.banner = Some(banner_row(theme, label, section.width, boxes.len()));
    section.body.push(RowNode::new(cells));
    section
}

fn signature_box(theme: &StyleTheme, sig: &SignatureBox, width: u32) -> CellNode {
    let p = &theme.palette;
    let ts = &theme.type_scale;

    let mut paragraphs = vec![
        para(text(theme, &sig.title).size(ts.label).color(&p.primary).bold())
            .align(Align::Center),
        blank(theme, 200),
        para(text(theme, &theme.text.signature_line).size(ts.value)).align(Align::Center),
        para(
            text(theme, &theme.text.signature_caption)
                .size(ts.caption)
                .color(&p.gray),
        )
        .align(Align::Center)
        .before(40),
        blank(theme, 120),
    ];
    paragraphs.extend(
        sig.fields
            .iter()
            .map(|field| para(text(theme, field).size(ts.label)).before(100)),
    );

    cell(theme, width, paragraphs).shade(&p.off_white)
}
