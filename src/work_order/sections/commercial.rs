//! 1. Commercial information: client identity and contact.

use crate::work_order::identifiers::OtIdentifiers;
use crate::work_order::layout::LayoutMode;
use crate::work_order::models::WorkOrderRecord;
use crate::work_order::primitives::{banner_row, label_value_row, para, para_runs, split, text};
use crate::work_order::theme::StyleTheme;
use crate::work_order::tree::{SectionKind, SectionNode};

pub fn build(
    record: &WorkOrderRecord,
    _ids: &OtIdentifiers,
    theme: &StyleTheme,
    _mode: LayoutMode,
) -> SectionNode {
    let p = &theme.palette;
    let size = theme.type_scale.value;
    let grid = split(theme.content_width(), &[25, 75]);
    let widths = (grid[0], grid[1]);
    let label = &theme.text.titles.commercial;
    let labels = &theme.text.commercial;

    let value = |v: &str| para(text(theme, v).size(size));

    let contact = para_runs(vec![
        text(theme, format!("{}  ", record.contacto_cliente))
            .size(size)
            .bold(),
        text(theme, format!("{}{}", labels.phone_prefix, record.telefono_cliente))
            .size(theme.type_scale.label)
            .color(&p.gray),
    ]);

    let mut section = SectionNode::new(SectionKind::CommercialInfo, label, grid);
    section.banner = Some(banner_row(theme, label, section.width, 2));
    section.body = vec![
        label_value_row(theme, &labels.ruc, size, value(record.ruc_cliente.as_str()), widths),
        label_value_row(theme, &labels.business_name, size, value(record.cliente.as_str()), widths),
        label_value_row(
            theme,
            &labels.fiscal_address,
            size,
            value(record.direccion_cliente.as_str()),
            widths,
        ),
        label_value_row(theme, &labels.contact, size, contact, widths),
        label_value_row(
            theme,
            &labels.email,
            size,
            para(text(theme, &record.email_cliente).size(size).color(&p.accent)),
            widths,
        ),
    ];
    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::work_order::sections::fixtures;

    #[test]
    fn test_commercial_rows() {
        let theme = StyleTheme::metromecanica();
        let section = build(
            &fixtures::record(),
            &fixtures::ids(),
            &theme,
            LayoutMode::Itemized,
        );

        assert_eq!(section.body.len(), 5);
        assert_eq!(section.grid, vec![2551, 7655]);
        for row in section.rows() {
            assert_eq!(row.total_width(), theme.content_width());
        }

        let labels: Vec<String> = section.body.iter().map(|r| r.cells[0].plain_text()).collect();
        assert_eq!(
            labels,
            vec!["RUC", "Razón Social", "Dirección Fiscal", "Contacto", "Correo Electrónico"]
        );
        assert_eq!(section.body[0].cells[1].plain_text(), "20100047218");
        assert_eq!(
            section.body[3].cells[1].plain_text(),
            "Rosa Quispe  · Tel: 987 654 321"
        );
        assert_eq!(section.body[0].cells[0].shading.as_deref(), Some("E8F2F7"));
    }

    #[test]
    fn test_labels_come_from_theme() {
        let mut theme = StyleTheme::metromecanica();
        theme.text.commercial.ruc = "RUC / NIT".to_string();
        theme.text.commercial.phone_prefix = "· Teléfono: ".to_string();
        let section = build(
            &fixtures::record(),
            &fixtures::ids(),
            &theme,
            LayoutMode::Itemized,
        );

        assert_eq!(section.body[0].cells[0].plain_text(), "RUC / NIT");
        assert_eq!(
            section.body[3].cells[1].plain_text(),
            "Rosa Quispe  · Teléfono: 987 654 321"
        );
    }

    #[test]
    fn test_banner_spans_both_columns() {
        let theme = StyleTheme::metromecanica();
        let section = build(
            &fixtures::record(),
            &fixtures::ids(),
            &theme,
            LayoutMode::Itemized,
        );
        let banner = section.banner.as_ref().unwrap();
        assert_eq!(banner.total_span(), 2);
        assert_eq!(banner.cells[0].plain_text(), "1. INFORMACIÓN COMERCIAL");
    }
}
