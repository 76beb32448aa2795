//! Document assembly: fixed section order, spacers and page setup.

use super::identifiers::OtIdentifiers;
use super::layout::LayoutMode;
use super::models::WorkOrderRecord;
use super::sections::{header, BODY_SECTIONS};
use super::theme::StyleTheme;
use super::tree::{Block, DocumentTree};

/// Compose the complete document tree for an approved record.
///
/// No branching happens here beyond what `mode` already resolved.
pub fn compose(
    record: &WorkOrderRecord,
    ids: &OtIdentifiers,
    theme: &StyleTheme,
    mode: LayoutMode,
    logo: Option<&[u8]>,
) -> DocumentTree {
    let geometry = &theme.geometry;
    let mut children = vec![
        Block::Section(header::build_header(ids, theme, logo)),
        Block::Spacer(geometry.spacer_after_header),
        Block::Section(header::build_status_banner(record, theme)),
    ];

    for build in BODY_SECTIONS {
        children.push(Block::Spacer(geometry.spacer_between_sections));
        children.push(Block::Section(build(record, ids, theme, mode)));
    }

    children.push(Block::Spacer(geometry.spacer_before_footer));
    children.push(Block::Paragraph(header::build_footer(ids, theme)));

    DocumentTree {
        page: theme.page(),
        defaults: theme.run_defaults(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::work_order::sections::fixtures;
    use crate::work_order::tree::SectionKind;

    fn tree() -> DocumentTree {
        let record = fixtures::record();
        compose(
            &record,
            &fixtures::ids(),
            &StyleTheme::metromecanica(),
            LayoutMode::for_record(&record),
            None,
        )
    }

    #[test]
    fn test_section_order() {
        let kinds: Vec<SectionKind> = tree().sections().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Header,
                SectionKind::StatusBanner,
                SectionKind::CommercialInfo,
                SectionKind::Observations,
                SectionKind::ServiceDescription,
                SectionKind::ResponsibleAreas,
                SectionKind::TechnicalActivities,
                SectionKind::IsoRequirements,
                SectionKind::Signatures,
            ]
        );
    }

    #[test]
    fn test_spacers_between_blocks() {
        let tree = tree();
        // header, status, 7 sections, footer, and a spacer before each but the first
        assert_eq!(tree.children.len(), 19);

        let spacers: Vec<u32> = tree
            .children
            .iter()
            .filter_map(|b| match b {
                Block::Spacer(space) => Some(*space),
                _ => None,
            })
            .collect();
        assert_eq!(spacers, vec![180, 240, 240, 240, 240, 240, 240, 240, 200]);

        for pair in tree.children.windows(2) {
            let both_content = !matches!(pair[0], Block::Spacer(_))
                && !matches!(pair[1], Block::Spacer(_));
            assert!(!both_content, "missing spacer between blocks");
        }
        assert!(matches!(tree.children.last(), Some(Block::Paragraph(_))));
    }

    #[test]
    fn test_page_setup_and_defaults() {
        let tree = tree();
        assert_eq!(tree.page.width, 11906);
        assert_eq!(tree.page.height, 16838);
        assert_eq!(tree.page.margin, 850);
        assert_eq!(tree.defaults.font, "Aptos");
        assert_eq!(tree.defaults.size, 20);
        assert_eq!(tree.defaults.color, "2D3748");
    }

    #[test]
    fn test_all_sections_fill_content_width() {
        for record in [fixtures::record(), fixtures::many_items(8)] {
            let tree = compose(
                &record,
                &fixtures::ids(),
                &StyleTheme::metromecanica(),
                LayoutMode::for_record(&record),
                None,
            );
            for section in tree.sections() {
                assert_eq!(section.width, 10206, "{:?}", section.kind);
                assert_eq!(section.grid.iter().sum::<u32>(), 10206);
                for row in section.rows() {
                    assert_eq!(row.total_width(), 10206, "{:?}", section.kind);
                }
            }
        }
    }
}
