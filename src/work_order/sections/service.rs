//! 2. Service description: the line items under the selected layout mode.
//!
//! Both modes share the fixed five-column grid. The description column takes
//! whatever the other four leave of the content width.

use crate::work_order::identifiers::OtIdentifiers;
use crate::work_order::layout::LayoutMode;
use crate::work_order::models::{LineItem, WorkOrderRecord};
use crate::work_order::primitives::{banner_row, blank, cell, para, text};
use crate::work_order::theme::StyleTheme;
use crate::work_order::tree::{Align, CellNode, RowNode, SectionKind, SectionNode};

const SEQ_WIDTH: u32 = 600;
const QTY_WIDTH: u32 = 900;
const UNIT_WIDTH: u32 = 900;
const CERT_WIDTH: u32 = 3000;
const COLUMNS: usize = 5;

/// Combined width of every column except the description.
pub const FIXED_COLUMNS_WIDTH: u32 = SEQ_WIDTH + QTY_WIDTH + UNIT_WIDTH + CERT_WIDTH;

/// Column widths for a given content width.
pub fn grid(content_width: u32) -> Vec<u32> {
    let fixed = FIXED_COLUMNS_WIDTH;
    vec![
        SEQ_WIDTH,
        QTY_WIDTH,
        UNIT_WIDTH,
        content_width.saturating_sub(fixed),
        CERT_WIDTH,
    ]
}

pub fn build(
    record: &WorkOrderRecord,
    _ids: &OtIdentifiers,
    theme: &StyleTheme,
    mode: LayoutMode,
) -> SectionNode {
    let label = &theme.text.titles.service;
    let mut section = SectionNode::new(
        SectionKind::ServiceDescription,
        label,
        grid(theme.content_width()),
    );
    section.banner = Some(banner_row(theme, label, section.width, COLUMNS));
    section.header.push(column_headers(theme, &section.grid));

    let scope = scope_text(record, theme);
    section.body = match mode {
        LayoutMode::Itemized => record
            .items
            .iter()
            .map(|item| itemized_row(theme, &section.grid, item, &scope))
            .collect(),
        LayoutMode::Compact => {
            let mut rows: Vec<RowNode> = record
                .items
                .iter()
                .enumerate()
                .map(|(idx, item)| compact_row(theme, &section.grid, idx, item))
                .collect();
            rows.push(aggregated_scope_row(theme, section.width, &scope));
            rows
        }
    };
    section
}

/// The record's overall scope, or the fixed default. Every itemized row
/// repeats this same text.
fn scope_text(record: &WorkOrderRecord, theme: &StyleTheme) -> String {
    record
        .alcance_servicio
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| theme.text.default_scope.clone())
}

fn unit_of<'a>(item: &'a LineItem, theme: &'a StyleTheme) -> &'a str {
    item.um
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(theme.text.default_unit.as_str())
}

fn column_headers(theme: &StyleTheme, grid: &[u32]) -> RowNode {
    let cells = theme
        .text
        .service_columns
        .iter()
        .zip(grid)
        .enumerate()
        .map(|(idx, (title, width))| {
            let mut p = para(
                text(theme, title)
                    .size(theme.type_scale.small)
                    .color(&theme.palette.primary)
                    .bold(),
            );
            // sequence, quantity and unit are centered
            if idx < 3 {
                p = p.align(Align::Center);
            }
            cell(theme, *width, vec![p]).shade(&theme.palette.light_blue)
        })
        .collect();
    RowNode::new(cells)
}

fn centered(theme: &StyleTheme, width: u32, value: &str, size: usize) -> CellNode {
    cell(
        theme,
        width,
        vec![para(text(theme, value).size(size)).align(Align::Center)],
    )
}

fn itemized_row(theme: &StyleTheme, grid: &[u32], item: &LineItem, scope: &str) -> RowNode {
    let ts = &theme.type_scale;
    let description = vec![
        para(text(theme, &item.descripcion).size(ts.label).bold()),
        blank(theme, 60),
        para(
            text(theme, &theme.text.scope_label)
                .size(ts.small)
                .color(&theme.palette.primary)
                .bold(),
        )
        .before(80),
        para(text(theme, scope).size(ts.label)).before(60),
    ];

    RowNode::new(vec![
        centered(theme, grid[0], &item.item.to_string(), ts.value),
        centered(theme, grid[1], &item.quantity_label(), ts.value),
        centered(theme, grid[2], unit_of(item, theme), ts.label),
        cell(theme, grid[3], description),
        cell(theme, grid[4], vec![para(text(theme, "").size(ts.label))])
            .shade(&theme.palette.off_white),
    ])
}

/// Even rows white, odd rows off-white.
pub fn zebra_shade(theme: &StyleTheme, idx: usize) -> &str {
    if idx % 2 == 0 {
        &theme.palette.white
    } else {
        &theme.palette.off_white
    }
}

fn compact_row(theme: &StyleTheme, grid: &[u32], idx: usize, item: &LineItem) -> RowNode {
    let ts = &theme.type_scale;
    let shade = zebra_shade(theme, idx);

    RowNode::new(
        vec![
            centered(theme, grid[0], &item.item.to_string(), ts.label),
            centered(theme, grid[1], &item.quantity_label(), ts.label),
            centered(theme, grid[2], unit_of(item, theme), ts.small),
            cell(
                theme,
                grid[3],
                vec![para(text(theme, &item.descripcion).size(ts.label))],
            ),
            cell(theme, grid[4], vec![para(text(theme, "").size(ts.small))]),
        ]
        .into_iter()
        .map(|c| c.shade(shade))
        .collect(),
    )
}

fn aggregated_scope_row(theme: &StyleTheme, width: u32, scope: &str) -> RowNode {
    let ts = &theme.type_scale;
    let paragraphs = vec![
        para(
            text(theme, &theme.text.aggregated_scope_label)
                .size(ts.small)
                .color(&theme.palette.primary)
                .bold(),
        ),
        para(text(theme, scope).size(ts.label)).before(80),
    ];
    RowNode::new(vec![cell(theme, width, paragraphs)
        .span(COLUMNS)
        .shade(&theme.palette.light_blue)])
}
