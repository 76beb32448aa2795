//! DOCX serialization of a [`DocumentTree`] with `docx-rs`.

use std::io::Cursor;
use std::panic::{self, AssertUnwindSafe};

use docx_rs::{
    AlignmentType, BorderType, BreakType, Docx, HeightRule, LineSpacing, PageMargin, Paragraph,
    Pic, Run, RunFonts, Shading, ShdType, Table, TableBorder, TableBorderPosition,
    TableBorders as DocxTableBorders, TableCell, TableCellBorder, TableCellBorderPosition,
    TableCellBorders, TableLayoutType, TableRow, VAlignType, WidthType,
};

use super::{DocumentRenderer, RenderError};
use crate::work_order::tree::{
    Align, Block, Border, CellBorders, CellNode, DocumentTree, ImageRun, Inline, ParagraphNode,
    RowNode, SectionNode, TableBorders, TextRun, VAlign,
};

/// English Metric Units per pixel at 96 dpi.
const EMU_PER_PX: u32 = 9525;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Stateless renderer producing `.docx` bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxRenderer;

impl DocumentRenderer for DocxRenderer {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn render(&self, tree: &DocumentTree) -> Result<Vec<u8>, RenderError> {
        let margin = tree.page.margin as i32;
        let mut docx = Docx::new()
            .page_size(tree.page.width, tree.page.height)
            .page_margin(
                PageMargin::new()
                    .top(margin)
                    .bottom(margin)
                    .left(margin)
                    .right(margin),
            )
            .default_fonts(fonts(&tree.defaults.font))
            .default_size(tree.defaults.size);

        for block in &tree.children {
            docx = match block {
                Block::Section(section) => docx.add_table(section_table(section)?),
                Block::Paragraph(paragraph) if paragraph.rule_above.is_some() => {
                    docx.add_table(ruled_paragraph(paragraph, tree.page.content_width())?)
                }
                Block::Paragraph(paragraph) => docx.add_paragraph(paragraph_of(paragraph)?),
                Block::Spacer(before) => docx.add_paragraph(
                    Paragraph::new()
                        .add_run(Run::new().add_text(" "))
                        .line_spacing(LineSpacing::new().before(*before)),
                ),
            };
        }

        let mut buffer = Vec::new();
        docx.build()
            .pack(&mut Cursor::new(&mut buffer))
            .map_err(|e| RenderError::Pack(e.to_string()))?;
        Ok(buffer)
    }
}

fn fonts(name: &str) -> RunFonts {
    RunFonts::new()
        .ascii(name)
        .hi_ansi(name)
        .east_asia(name)
        .cs(name)
}

fn alignment(align: Align) -> AlignmentType {
    match align {
        Align::Left => AlignmentType::Left,
        Align::Center => AlignmentType::Center,
        Align::Right => AlignmentType::Right,
    }
}

fn vertical(v_align: VAlign) -> VAlignType {
    match v_align {
        VAlign::Top => VAlignType::Top,
        VAlign::Center => VAlignType::Center,
        VAlign::Bottom => VAlignType::Bottom,
    }
}

fn text_run(run: &TextRun) -> Run {
    let text = if run.caps {
        run.text.to_uppercase()
    } else {
        run.text.clone()
    };
    let mut out = Run::new()
        .add_text(text)
        .size(run.size)
        .color(run.color.as_str())
        .fonts(fonts(&run.font));
    if run.bold {
        out = out.bold();
    }
    if run.italic {
        out = out.italic();
    }
    if run.underline {
        out = out.underline("single");
    }
    out
}

fn image_run(image: &ImageRun) -> Result<Run, RenderError> {
    if !image.data.starts_with(PNG_MAGIC) && !image.data.starts_with(JPEG_MAGIC) {
        return Err(RenderError::Image("expected PNG or JPEG data".to_string()));
    }
    // the decoder inside Pic::new panics on corrupt data
    let pic = panic::catch_unwind(AssertUnwindSafe(|| Pic::new(&image.data)))
        .map_err(|_| RenderError::Image("could not decode image".to_string()))?;
    let pic = pic.size(image.width_px * EMU_PER_PX, image.height_px * EMU_PER_PX);
    Ok(Run::new().add_image(pic))
}

fn paragraph_of(node: &ParagraphNode) -> Result<Paragraph, RenderError> {
    let mut paragraph = Paragraph::new().align(alignment(node.align));
    if node.spacing_before > 0 || node.spacing_after > 0 {
        paragraph = paragraph.line_spacing(
            LineSpacing::new()
                .before(node.spacing_before)
                .after(node.spacing_after),
        );
    }

    for inline in &node.children {
        paragraph = match inline {
            Inline::Text(run) => paragraph.add_run(text_run(run)),
            Inline::Image(image) => paragraph.add_run(image_run(image)?),
            Inline::Break => paragraph.add_run(Run::new().add_break(BreakType::TextWrapping)),
        };
    }
    Ok(paragraph)
}

fn table_border(position: TableBorderPosition, border: &Border) -> TableBorder {
    match border {
        Border::None => TableBorder::new(position).border_type(BorderType::Nil),
        Border::Single { size, color } => TableBorder::new(position)
            .size(*size)
            .color(color.as_str())
            .border_type(BorderType::Single),
    }
}

fn table_borders(borders: &TableBorders) -> DocxTableBorders {
    DocxTableBorders::with_empty()
        .set(table_border(TableBorderPosition::Top, &borders.top))
        .set(table_border(TableBorderPosition::Bottom, &borders.bottom))
        .set(table_border(TableBorderPosition::Left, &borders.left))
        .set(table_border(TableBorderPosition::Right, &borders.right))
        .set(table_border(TableBorderPosition::InsideH, &borders.inside_h))
        .set(table_border(TableBorderPosition::InsideV, &borders.inside_v))
}

fn cell_border(position: TableCellBorderPosition, border: &Border) -> TableCellBorder {
    match border {
        Border::None => TableCellBorder::new(position).border_type(BorderType::Nil),
        Border::Single { size, color } => TableCellBorder::new(position)
            .size(*size)
            .color(color.as_str())
            .border_type(BorderType::Single),
    }
}

fn cell_borders(borders: &CellBorders) -> TableCellBorders {
    TableCellBorders::with_empty()
        .set(cell_border(TableCellBorderPosition::Top, &borders.top))
        .set(cell_border(TableCellBorderPosition::Bottom, &borders.bottom))
        .set(cell_border(TableCellBorderPosition::Left, &borders.left))
        .set(cell_border(TableCellBorderPosition::Right, &borders.right))
}

fn table_cell(node: &CellNode) -> Result<TableCell, RenderError> {
    let mut cell = TableCell::new()
        .width(node.width as usize, WidthType::Dxa)
        .vertical_align(vertical(node.v_align))
        .set_borders(cell_borders(&node.borders));
    if node.span > 1 {
        cell = cell.grid_span(node.span);
    }
    if let Some(fill) = &node.shading {
        cell = cell.shading(Shading::new().shd_type(ShdType::Clear).fill(fill.as_str()));
    }
    if node.paragraphs.is_empty() {
        // a cell must hold at least one paragraph
        cell = cell.add_paragraph(Paragraph::new());
    }
    for paragraph in &node.paragraphs {
        cell = cell.add_paragraph(paragraph_of(paragraph)?);
    }
    Ok(cell)
}

fn table_row(node: &RowNode) -> Result<TableRow, RenderError> {
    let cells = node
        .cells
        .iter()
        .map(table_cell)
        .collect::<Result<Vec<_>, _>>()?;
    let mut row = TableRow::new(cells);
    if let Some(height) = node.min_height {
        row = row.row_height(height as f32).height_rule(HeightRule::AtLeast);
    }
    Ok(row)
}

fn section_table(section: &SectionNode) -> Result<Table, RenderError> {
    let rows = section
        .rows()
        .map(table_row)
        .collect::<Result<Vec<_>, _>>()?;
    let mut table = Table::new(rows)
        .set_grid(section.grid.iter().map(|w| *w as usize).collect())
        .width(section.width as usize, WidthType::Dxa)
        .layout(TableLayoutType::Fixed);
    if let Some(borders) = &section.borders {
        table = table.set_borders(table_borders(borders));
    }
    Ok(table)
}

/// A paragraph with a rule above becomes a borderless one-cell table whose
/// only visible edge is the top one.
fn ruled_paragraph(node: &ParagraphNode, width: u32) -> Result<Table, RenderError> {
    let rule = node.rule_above.clone().unwrap_or(Border::None);
    let borders = CellBorders {
        top: rule,
        ..CellBorders::none()
    };
    let cell = TableCell::new()
        .width(width as usize, WidthType::Dxa)
        .set_borders(cell_borders(&borders))
        .add_paragraph(paragraph_of(node)?);

    Ok(Table::new(vec![TableRow::new(vec![cell])])
        .set_grid(vec![width as usize])
        .width(width as usize, WidthType::Dxa)
        .layout(TableLayoutType::Fixed)
        .set_borders(table_borders(&TableBorders::none())))
}
