//! Page header, status banner and footer.

use crate::work_order::identifiers::OtIdentifiers;
use crate::work_order::models::WorkOrderRecord;
use crate::work_order::primitives::{blank, cell, para, split, text};
use crate::work_order::theme::StyleTheme;
use crate::work_order::tree::{
    Align, Border, CellBorders, ImageRun, Inline, ParagraphNode, RowNode, SectionKind,
    SectionNode, TableBorders,
};

/// Three-column header: company block with logo, document title, control codes.
pub fn build_header(ids: &OtIdentifiers, theme: &StyleTheme, logo: Option<&[u8]>) -> SectionNode {
    let p = &theme.palette;
    let ts = &theme.type_scale;
    let co = &theme.company;
    let grid = split(theme.content_width(), &[35, 40, 25]);

    let mut company = Vec::new();
    if let Some(data) = logo {
        let px = theme.geometry.logo_px;
        company.push(
            ParagraphNode::default()
                .push(Inline::Image(ImageRun {
                    data: data.to_vec(),
                    width_px: px,
                    height_px: px,
                }))
                .align(Align::Center)
                .after(160),
        );
    }
    company.extend([
        para(text(theme, &co.name).size(ts.title).color(&p.primary).bold()).align(Align::Center),
        para(text(theme, &co.legal_name).size(ts.label).color(&p.gray)).align(Align::Center),
        blank(theme, 8),
        para(text(theme, &co.lab_name).size(ts.caption).color(&p.mid).bold()).align(Align::Center),
        para(text(theme, &co.accreditation).size(ts.tiny).color(&p.accent)).align(Align::Center),
    ]);

    let title = vec![
        para(
            text(theme, &theme.text.document_title)
                .size(ts.title)
                .color(&p.navy)
                .bold(),
        )
        .align(Align::Center),
        para(text(theme, &theme.text.document_subtitle).size(ts.small).color(&p.gray))
            .align(Align::Center)
            .before(80),
    ];

    let codes = vec![
        para(
            text(theme, format!("N°: {}", ids.ot_number))
                .color(&p.primary)
                .bold(),
        ),
        para(text(theme, format!("Expediente: {}", ids.expediente)).size(ts.small).color(&p.gray)),
        para(text(theme, format!("Código: {}", ids.codigo_doc)).size(ts.small).color(&p.gray)),
        blank(theme, 6),
        para(text(theme, format!("Versión: {}", theme.text.version)).size(ts.caption).color(&p.gray)),
        para(text(theme, format!("Página: {}", theme.text.page_label)).size(ts.caption).color(&p.gray)),
    ];

    let mut row = RowNode::new(vec![
        cell(theme, grid[0], company)
            .borders(CellBorders::none())
            .shade(&p.off_white),
        cell(theme, grid[1], title).borders(CellBorders::none()),
        cell(theme, grid[2], codes)
            .borders(CellBorders::none())
            .shade(&p.light_blue),
    ]);
    row.min_height = Some(theme.geometry.header_height);

    let mut section = SectionNode::new(SectionKind::Header, &theme.text.document_title, grid);
    section.borders = Some(TableBorders {
        top: Border::single(12, &p.primary),
        bottom: Border::single(2, &p.primary),
        inside_v: Border::single(theme.geometry.cell_border, &p.light_gray),
        ..TableBorders::none()
    });
    section.body.push(row);
    section
}

/// Colored strip with the approval state, dates and the proforma reference.
pub fn build_status_banner(record: &WorkOrderRecord, theme: &StyleTheme) -> SectionNode {
    let p = &theme.palette;
    let ts = &theme.type_scale;
    let grid = split(theme.content_width(), &[22, 22, 22, 34]);

    let white = |content: String| {
        para(text(theme, content).size(ts.label).color(&p.white)).align(Align::Center)
    };
    let status = para(
        text(theme, &theme.text.status_approved)
            .size(ts.banner)
            .color(&p.white)
            .bold(),
    )
    .align(Align::Center);

    let cells = vec![
        cell(theme, grid[0], vec![status]).shade(&p.success),
        cell(
            theme,
            grid[1],
            vec![white(format!("Emisión: {}", theme.or_empty(record.issue_date())))],
        )
        .shade(&p.mid),
        cell(
            theme,
            grid[2],
            vec![white(format!("Entrega: {}", theme.or_empty(Some(record.plazo_entrega.as_str()))))],
        )
        .shade(&p.mid),
        cell(
            theme,
            grid[3],
            vec![white(format!(
                "Ref. Proforma: {}",
                theme.or_empty(Some(record.numero_proforma.as_str()))
            ))],
        )
        .shade(&p.primary),
    ]
    .into_iter()
    .map(|c| c.borders(CellBorders::none()))
    .collect();

    let mut section = SectionNode::new(SectionKind::StatusBanner, &theme.text.status_approved, grid);
    section.borders = Some(TableBorders::none());
    section.body.push(RowNode::new(cells));
    section
}

/// Centered company line under a thin rule, then the document-control code.
pub fn build_footer(ids: &OtIdentifiers, theme: &StyleTheme) -> ParagraphNode {
    let p = &theme.palette;
    let ts = &theme.type_scale;
    let co = &theme.company;
    let gray = |content: String| Inline::Text(text(theme, content).size(ts.small).color(&p.gray));

    ParagraphNode {
        children: vec![
            gray(format!("{} - {}  ·  ", co.name, co.legal_name)),
            gray(format!("{}  ·  ", co.address)),
            gray(co.phones.clone()),
            Inline::Break,
            Inline::Text(text(theme, &ids.codigo_doc).size(ts.tiny).color(&p.mid)),
        ],
        align: Align::Center,
        spacing_before: theme.geometry.spacer_before_footer,
        spacing_after: 100,
        rule_above: Some(Border::single(theme.geometry.cell_border, &p.light_gray)),
    }
}
