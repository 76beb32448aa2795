//! Small constructors shared by the section builders.

use super::theme::StyleTheme;
use super::tree::{
    Align, Border, CellBorders, CellNode, Inline, ParagraphNode, RowNode, TextRun, VAlign,
};

impl TextRun {
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn caps(mut self) -> Self {
        self.caps = true;
        self
    }
}

impl ParagraphNode {
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn before(mut self, dxa: u32) -> Self {
        self.spacing_before = dxa;
        self
    }

    pub fn after(mut self, dxa: u32) -> Self {
        self.spacing_after = dxa;
        self
    }

    pub fn push(mut self, inline: Inline) -> Self {
        self.children.push(inline);
        self
    }
}

impl CellNode {
    pub fn span(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    pub fn shade(mut self, color: &str) -> Self {
        self.shading = Some(color.to_string());
        self
    }

    pub fn borders(mut self, borders: CellBorders) -> Self {
        self.borders = borders;
        self
    }

    pub fn v_align(mut self, v_align: VAlign) -> Self {
        self.v_align = v_align;
        self
    }
}

/// Body-styled run in the theme font.
pub fn text(theme: &StyleTheme, content: impl Into<String>) -> TextRun {
    TextRun {
        text: content.into(),
        font: theme.type_scale.font.clone(),
        size: theme.type_scale.body,
        color: theme.palette.slate.clone(),
        bold: false,
        italic: false,
        caps: false,
        underline: false,
    }
}

pub fn para(run: TextRun) -> ParagraphNode {
    para_runs(vec![run])
}

pub fn para_runs(runs: Vec<TextRun>) -> ParagraphNode {
    ParagraphNode {
        children: runs.into_iter().map(Inline::Text).collect(),
        ..Default::default()
    }
}

/// A single-space paragraph whose run size sets the vertical gap.
pub fn blank(theme: &StyleTheme, size: usize) -> ParagraphNode {
    para(text(theme, " ").size(size))
}

/// Cell with the default light border and vertical centering.
pub fn cell(theme: &StyleTheme, width: u32, paragraphs: Vec<ParagraphNode>) -> CellNode {
    CellNode {
        width,
        span: 1,
        shading: None,
        borders: CellBorders::all(Border::single(
            theme.geometry.cell_border,
            &theme.palette.light_gray,
        )),
        v_align: VAlign::Center,
        paragraphs,
    }
}

/// Full-width navy banner carrying a section title.
pub fn banner_row(theme: &StyleTheme, label: &str, width: u32, span: usize) -> RowNode {
    let title = text(theme, label)
        .size(theme.type_scale.banner)
        .color(&theme.palette.white)
        .bold()
        .caps();

    RowNode::new(vec![cell(theme, width, vec![para(title)])
        .span(span)
        .shade(&theme.palette.navy)
        .borders(CellBorders::all(Border::single(
            theme.geometry.banner_border,
            &theme.palette.navy,
        )))])
}

/// Bold label on the light-blue key column.
pub fn label_cell(theme: &StyleTheme, label: &str, width: u32, size: usize) -> CellNode {
    let run = text(theme, label)
        .size(size)
        .color(&theme.palette.primary)
        .bold();
    cell(theme, width, vec![para(run)]).shade(&theme.palette.light_blue)
}

/// Two-column key/value row.
pub fn label_value_row(
    theme: &StyleTheme,
    label: &str,
    label_size: usize,
    value: ParagraphNode,
    widths: (u32, u32),
) -> RowNode {
    RowNode::new(vec![
        label_cell(theme, label, widths.0, label_size),
        cell(theme, widths.1, vec![value]),
    ])
}

/// Split `total` by integer percentages; the last column takes the remainder
/// so the parts always sum to `total`.
pub fn split(total: u32, percents: &[u32]) -> Vec<u32> {
    let mut widths: Vec<u32> = percents.iter().map(|p| total * p / 100).collect();
    if let Some((last, head)) = widths.split_last_mut() {
        *last = total - head.iter().sum::<u32>();
    }
    widths
}

/// `n` equal columns, remainder on the last.
pub fn even_split(total: u32, n: usize) -> Vec<u32> {
    if n == 0 {
        return Vec::new();
    }
    let part = total / n as u32;
    let mut widths = vec![part; n];
    widths[n - 1] = total - part * (n as u32 - 1);
    widths
}
