//! Renderer-neutral document tree.
//!
//! Sections are self-contained: no node refers to another, and ordering is
//! owned by the assembler. Widths are in twentieths of a point (dxa), text
//! sizes in half-points, colors as `RRGGBB` hex.

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// A single border edge. `size` is in eighths of a point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Border {
    None,
    Single { size: usize, color: String },
}

impl Border {
    pub fn single(size: usize, color: &str) -> Self {
        Border::Single {
            size,
            color: color.to_string(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Border::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBorders {
    pub top: Border,
    pub bottom: Border,
    pub left: Border,
    pub right: Border,
}

impl CellBorders {
    pub fn all(border: Border) -> Self {
        Self {
            top: border.clone(),
            bottom: border.clone(),
            left: border.clone(),
            right: border,
        }
    }

    pub fn none() -> Self {
        Self::all(Border::None)
    }
}

/// Table-level borders, used by the header and the status banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBorders {
    pub top: Border,
    pub bottom: Border,
    pub left: Border,
    pub right: Border,
    pub inside_h: Border,
    pub inside_v: Border,
}

impl TableBorders {
    pub fn none() -> Self {
        Self {
            top: Border::None,
            bottom: Border::None,
            left: Border::None,
            right: Border::None,
            inside_h: Border::None,
            inside_v: Border::None,
        }
    }
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: String,
    pub size: usize,
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub caps: bool,
    pub underline: bool,
}

/// An embedded raster image, sized in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRun {
    pub data: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(TextRun),
    Image(ImageRun),
    Break,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphNode {
    pub children: Vec<Inline>,
    pub align: Align,
    pub spacing_before: u32,
    pub spacing_after: u32,
    /// Horizontal rule drawn above the paragraph.
    pub rule_above: Option<Border>,
}

impl ParagraphNode {
    /// Concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|inline| match inline {
                Inline::Text(run) => Some(run.text.as_str()),
                Inline::Break => Some("\n"),
                Inline::Image(_) => None,
            })
            .collect()
    }

    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.children.iter().filter_map(|inline| match inline {
            Inline::Text(run) => Some(run),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellNode {
    pub width: u32,
    /// Number of grid columns covered.
    pub span: usize,
    pub shading: Option<String>,
    pub borders: CellBorders,
    pub v_align: VAlign,
    pub paragraphs: Vec<ParagraphNode>,
}

impl CellNode {
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(ParagraphNode::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowNode {
    pub cells: Vec<CellNode>,
    /// Minimum row height in dxa.
    pub min_height: Option<u32>,
}

impl RowNode {
    pub fn new(cells: Vec<CellNode>) -> Self {
        Self {
            cells,
            min_height: None,
        }
    }

    pub fn total_width(&self) -> u32 {
        self.cells.iter().map(|c| c.width).sum()
    }

    pub fn total_span(&self) -> usize {
        self.cells.iter().map(|c| c.span).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Header,
    StatusBanner,
    CommercialInfo,
    Observations,
    ServiceDescription,
    ResponsibleAreas,
    TechnicalActivities,
    IsoRequirements,
    Signatures,
}

/// A self-contained table fragment: optional banner, column headers, body.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionNode {
    pub kind: SectionKind,
    pub label: String,
    pub width: u32,
    /// Grid column widths; they sum to `width`.
    pub grid: Vec<u32>,
    pub borders: Option<TableBorders>,
    pub banner: Option<RowNode>,
    pub header: Vec<RowNode>,
    pub body: Vec<RowNode>,
}

impl SectionNode {
    pub fn new(kind: SectionKind, label: impl Into<String>, grid: Vec<u32>) -> Self {
        Self {
            kind,
            label: label.into(),
            width: grid.iter().sum(),
            grid,
            borders: None,
            banner: None,
            header: Vec::new(),
            body: Vec::new(),
        }
    }

    /// All rows in rendering order.
    pub fn rows(&self) -> impl Iterator<Item = &RowNode> {
        self.banner
            .iter()
            .chain(self.header.iter())
            .chain(self.body.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Section(SectionNode),
    Paragraph(ParagraphNode),
    /// Empty paragraph with vertical space before it, in dxa.
    Spacer(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSetup {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl PageSetup {
    pub fn content_width(&self) -> u32 {
        self.width - 2 * self.margin
    }
}

/// Default run style applied document-wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDefaults {
    pub font: String,
    pub size: usize,
    pub color: String,
}

/// The complete structure handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTree {
    pub page: PageSetup,
    pub defaults: RunDefaults,
    pub children: Vec<Block>,
}

impl DocumentTree {
    pub fn sections(&self) -> impl Iterator<Item = &SectionNode> {
        self.children.iter().filter_map(|block| match block {
            Block::Section(section) => Some(section),
            _ => None,
        })
    }

    pub fn section(&self, kind: SectionKind) -> Option<&SectionNode> {
        self.sections().find(|s| s.kind == kind)
    }
}
