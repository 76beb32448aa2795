//! Fixed visual and textual configuration of the work order.
//!
//! Every section builder receives a `StyleTheme` instead of reaching for
//! constants, so a different palette or wording can be loaded from a JSON file
//! (`OT_THEME_PATH`) without touching layout code.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::sections::service::FIXED_COLUMNS_WIDTH;
use super::tree::{PageSetup, RunDefaults};

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to read theme file: {0}")]
    Io(#[source] std::io::Error),
    #[error("invalid theme file: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("theme leaves {0} dxa of content width, at least {1} are needed")]
    Geometry(u32, u32),
    #[error("theme defines no signature boxes")]
    NoSignatureBoxes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub navy: String,
    pub primary: String,
    pub mid: String,
    pub accent: String,
    pub light_blue: String,
    pub slate: String,
    pub gray: String,
    pub light_gray: String,
    pub off_white: String,
    pub success: String,
    pub white: String,
}

/// Text sizes in half-points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeScale {
    pub font: String,
    pub body: usize,
    pub title: usize,
    pub banner: usize,
    pub value: usize,
    pub label: usize,
    pub small: usize,
    pub caption: usize,
    pub tiny: usize,
    pub checkbox: usize,
}

/// Page size, margins and inter-block spacing in dxa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub page_width: u32,
    pub page_height: u32,
    pub margin: u32,
    pub spacer_after_header: u32,
    pub spacer_between_sections: u32,
    pub spacer_before_footer: u32,
    pub header_height: u32,
    pub cell_border: usize,
    pub banner_border: usize,
    pub logo_px: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub legal_name: String,
    pub lab_name: String,
    pub accreditation: String,
    pub address: String,
    pub phones: String,
    pub lab_email: String,
    pub quality_email: String,
}

/// Row labels of the commercial information table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommercialLabels {
    pub ruc: String,
    pub business_name: String,
    pub fiscal_address: String,
    pub contact: String,
    pub phone_prefix: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTitles {
    pub commercial: String,
    pub observations: String,
    pub service: String,
    pub areas: String,
    pub activities: String,
    pub iso: String,
    pub signatures: String,
}

/// Value column of one ISO requirement row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "text", rename_all = "snake_case")]
pub enum IsoValue {
    Fixed(String),
    /// The record's equipment list, joined with the theme separator.
    Equipment,
    /// The record's installed-component description.
    InstalledComponent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsoRow {
    pub label: String,
    pub value: IsoValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureBox {
    pub title: String,
    pub fields: Vec<String>,
}

/// Domain text reproduced verbatim in every work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boilerplate {
    pub document_title: String,
    pub document_subtitle: String,
    pub version: String,
    pub page_label: String,
    pub status_approved: String,
    pub titles: SectionTitles,
    pub commercial: CommercialLabels,
    pub observations_hint: String,
    pub observations_blank_lines: usize,
    pub service_columns: [String; 5],
    pub scope_label: String,
    pub aggregated_scope_label: String,
    pub default_scope: String,
    pub default_unit: String,
    pub executing_area_label: String,
    pub quality_area_label: String,
    pub coordinator_label: String,
    pub assignment_date_label: String,
    pub signature_line: String,
    pub activities_intro: String,
    pub checkbox: String,
    pub trailing_activity: String,
    pub iso_rows: Vec<IsoRow>,
    pub signature_caption: String,
    pub signature_boxes: Vec<SignatureBox>,
    pub list_separator: String,
    pub empty_value: String,
}

/// Immutable configuration injected into every section builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleTheme {
    pub palette: Palette,
    pub type_scale: TypeScale,
    pub geometry: Geometry,
    pub company: Company,
    pub text: Boilerplate,
}

impl Default for StyleTheme {
    fn default() -> Self {
        Self::metromecanica()
    }
}

fn s(value: &str) -> String {
    value.to_string()
}

fn fixed(label: &str, value: &str) -> IsoRow {
    IsoRow {
        label: s(label),
        value: IsoValue::Fixed(s(value)),
    }
}

impl StyleTheme {
    /// The laboratory's standard theme.
    pub fn metromecanica() -> Self {
        Self {
            palette: Palette {
                navy: s("0A2540"),
                primary: s("1E3A5F"),
                mid: s("2E5C8A"),
                accent: s("4A90E2"),
                light_blue: s("E8F2F7"),
                slate: s("2D3748"),
                gray: s("4A5568"),
                light_gray: s("E2E8F0"),
                off_white: s("F7FAFC"),
                success: s("48BB78"),
                white: s("FFFFFF"),
            },
            type_scale: TypeScale {
                font: s("Aptos"),
                body: 20,
                title: 28,
                banner: 18,
                value: 18,
                label: 17,
                small: 16,
                caption: 15,
                tiny: 14,
                checkbox: 22,
            },
            geometry: Geometry {
                page_width: 11906,
                page_height: 16838,
                margin: 850,
                spacer_after_header: 180,
                spacer_between_sections: 240,
                spacer_before_footer: 200,
                header_height: 1100,
                cell_border: 4,
                banner_border: 8,
                logo_px: 100,
            },
            company: Company {
                name: s("METROMECANICA"),
                legal_name: s("Metrología y Calibración SAC"),
                lab_name: s("Laboratorio de Calibración"),
                accreditation: s("ISO/IEC 17025:2017"),
                address: s("Psj. 18 de Enero Mz. LL Lte 3, Urb. Bambeta Baja Este, Sector 5, Callao"),
                phones: s("Telef: 940 255 997 / 980 762 761"),
                lab_email: s("laboratorio@metromecanica.com.pe"),
                quality_email: s("calidad@metromecanica.com.pe"),
            },
            text: Boilerplate {
                document_title: s("ORDEN DE TRABAJO"),
                document_subtitle: s("Documento de Control Interno"),
                version: s("02"),
                page_label: s("1 de 1"),
                status_approved: s("ESTADO: APROBADA"),
                titles: SectionTitles {
                    commercial: s("1. INFORMACIÓN COMERCIAL"),
                    observations: s("OBSERVACIONES PARA EL SERVICIO"),
                    service: s("2. DESCRIPCIÓN DEL SERVICIO"),
                    areas: s("3. ÁREAS RESPONSABLES"),
                    activities: s("4. ACTIVIDADES TÉCNICAS INCLUIDAS"),
                    iso: s("5. REQUISITOS TÉCNICOS — ISO/IEC 17025:2017"),
                    signatures: s("6. APROBACIONES Y FIRMAS (Cláusula 5.5 - ISO/IEC 17025:2017)"),
                },
                commercial: CommercialLabels {
                    ruc: s("RUC"),
                    business_name: s("Razón Social"),
                    fiscal_address: s("Dirección Fiscal"),
                    contact: s("Contacto"),
                    phone_prefix: s("· Tel: "),
                    email: s("Correo Electrónico"),
                },
                observations_hint: s(
                    "Indicaciones especiales, condiciones del cliente o notas importantes para la ejecución:",
                ),
                observations_blank_lines: 5,
                service_columns: [
                    s("N°"),
                    s("CANT."),
                    s("U/M"),
                    s("DESCRIPCIÓN DEL INSTRUMENTO / COMPONENTE"),
                    s("CERTIFICADO ASIGNADO"),
                ],
                scope_label: s("Alcance del servicio:"),
                aggregated_scope_label: s("ALCANCE GENERAL DEL SERVICIO"),
                default_scope: s("Servicio completo según especificación"),
                default_unit: s("UND"),
                executing_area_label: s("Área Ejecutora"),
                quality_area_label: s("Área de Calidad"),
                coordinator_label: s("Coordinador Asignado"),
                assignment_date_label: s("Fecha de Asignación"),
                signature_line: s("_________________________________"),
                activities_intro: s("El servicio comprende las siguientes actividades:"),
                checkbox: s("☐  "),
                trailing_activity: s("Verificación metrológica post-servicio (si aplica)"),
                iso_rows: vec![
                    fixed("Tipo de Servicio", "Mantenimiento preventivo de equipos de medición"),
                    fixed(
                        "Normas de Referencia",
                        "OIML R 76 / ASTM E617 / Especificaciones del fabricante",
                    ),
                    IsoRow {
                        label: s("Equipos Intervenidos"),
                        value: IsoValue::Equipment,
                    },
                    IsoRow {
                        label: s("Componente Instalado"),
                        value: IsoValue::InstalledComponent,
                    },
                    fixed(
                        "Trazabilidad Metrológica",
                        "Patrones calibrados trazables a INACAL / BIPM",
                    ),
                    fixed(
                        "Condiciones Ambientales",
                        "Temperatura: 18-28°C  ·  Humedad: 40-70%  ·  Sin vibraciones",
                    ),
                    fixed(
                        "Registro Ambiental",
                        "Obligatorio (Cláusula 6.3 - ISO/IEC 17025:2017)",
                    ),
                    fixed(
                        "Personal Competente",
                        "Técnico certificado en calibración de equipos de pesaje",
                    ),
                    fixed(
                        "EPP Requerido",
                        "Guantes dieléctricos · Lentes de seguridad · Calzado de seguridad",
                    ),
                ],
                signature_caption: s("Firma / Sello"),
                signature_boxes: vec![
                    SignatureBox {
                        title: s("TÉCNICO EJECUTOR"),
                        fields: vec![
                            s("Nombre: ________________________"),
                            s("Código: ________________________"),
                            s("Fecha:  ________________________"),
                        ],
                    },
                    SignatureBox {
                        title: s("SUPERVISOR / JEFE DE LABORATORIO"),
                        fields: vec![
                            s("Nombre: ________________________"),
                            s("Cargo:  ________________________"),
                            s("Fecha:  ________________________"),
                        ],
                    },
                    SignatureBox {
                        title: s("CONFORMIDAD DEL CLIENTE"),
                        fields: vec![
                            s("Nombre: ________________________"),
                            s("DNI:    ________________________"),
                            s("Fecha:  ________________________"),
                        ],
                    },
                ],
                list_separator: s(" · "),
                empty_value: s("—"),
            },
        }
    }

    /// Load a complete theme from a JSON file.
    ///
    /// The page must leave room for the service table's fixed columns plus a
    /// description column, and at least one signature box is required.
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let raw = fs::read_to_string(path).map_err(ThemeError::Io)?;
        let theme: StyleTheme = serde_json::from_str(&raw).map_err(ThemeError::Parse)?;

        let geometry = &theme.geometry;
        let content = geometry
            .page_width
            .saturating_sub(geometry.margin.saturating_mul(2));
        if content <= FIXED_COLUMNS_WIDTH {
            return Err(ThemeError::Geometry(content, FIXED_COLUMNS_WIDTH + 1));
        }
        if theme.text.signature_boxes.is_empty() {
            return Err(ThemeError::NoSignatureBoxes);
        }
        Ok(theme)
    }

    pub fn page(&self) -> PageSetup {
        PageSetup {
            width: self.geometry.page_width,
            height: self.geometry.page_height,
            margin: self.geometry.margin,
        }
    }

    /// Usable width between the left and right margins.
    pub fn content_width(&self) -> u32 {
        self.page().content_width()
    }

    pub fn run_defaults(&self) -> RunDefaults {
        RunDefaults {
            font: self.type_scale.font.clone(),
            size: self.type_scale.body,
            color: self.palette.slate.clone(),
        }
    }

    /// Join list values with the theme separator, or the empty placeholder.
    pub fn join_list(&self, values: &[String]) -> String {
        let values: Vec<&str> = values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .collect();
        if values.is_empty() {
            self.text.empty_value.clone()
        } else {
            values.join(&self.text.list_separator)
        }
    }

    /// `value` when it has content, the empty placeholder otherwise.
    pub fn or_empty(&self, value: Option<&str>) -> String {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.text.empty_value.clone())
    }
}
