#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use metromecanica_ot::config::AppConfig;
use metromecanica_ot::render::{ConvertError, DocumentConverter};
use metromecanica_ot::work_order::{LineItem, StyleTheme, WorkOrderGenerator, WorkOrderRecord};
use metromecanica_ot::AppState;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const STUB_PDF: &[u8] = b"%PDF-1.4\n% stub\n";

/// In-memory SQLite pool. A single connection keeps the database alive.
pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite")
}

/// Fixed wall clock: every OT generated with it is numbered `OT-<year>-4321`.
pub fn frozen_clock() -> DateTime<Local> {
    Local
        .timestamp_millis_opt(1_773_585_004_321)
        .single()
        .expect("valid timestamp")
}

/// What the stub converter does when asked for a PDF.
#[derive(Debug, Clone, Copy)]
pub enum StubBehaviour {
    Succeed,
    NotInstalled,
    Timeout,
    Exit,
}

pub struct StubConverter {
    behaviour: StubBehaviour,
    calls: AtomicUsize,
}

impl StubConverter {
    pub fn new(behaviour: StubBehaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentConverter for StubConverter {
    async fn to_pdf(&self, _source: &Path) -> Result<Vec<u8>, ConvertError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behaviour {
            StubBehaviour::Succeed => Ok(STUB_PDF.to_vec()),
            StubBehaviour::NotInstalled => Err(ConvertError::NotInstalled("soffice".to_string())),
            StubBehaviour::Timeout => Err(ConvertError::Timeout(Duration::from_secs(30))),
            StubBehaviour::Exit => Err(ConvertError::Exit(1)),
        }
    }
}

pub fn test_config(output_dir: &Path, audit_enabled: bool) -> AppConfig {
    AppConfig {
        output_dir: output_dir.to_path_buf(),
        logo_path: output_dir.join("no-logo.png"),
        audit_enabled,
        ..AppConfig::default()
    }
}

pub async fn test_state(
    output_dir: &Path,
    audit_enabled: bool,
    converter: Arc<StubConverter>,
) -> AppState {
    let generator = WorkOrderGenerator::new(StyleTheme::metromecanica(), None);
    test_state_with_generator(output_dir, audit_enabled, converter, generator).await
}

pub async fn test_state_with_generator(
    output_dir: &Path,
    audit_enabled: bool,
    converter: Arc<StubConverter>,
    generator: WorkOrderGenerator,
) -> AppState {
    AppState::new_with_pool(
        memory_pool().await,
        test_config(output_dir, audit_enabled),
        generator,
        converter,
    )
    .await
    .expect("Failed to create AppState")
}

pub fn approved_record() -> WorkOrderRecord {
    WorkOrderRecord {
        ruc_cliente: "20100047218".to_string(),
        cliente: "INDUSTRIAS ANDINAS S.A.C.".to_string(),
        direccion_cliente: "Av. Argentina 2450, Callao".to_string(),
        contacto_cliente: "Rosa Quispe".to_string(),
        telefono_cliente: "987 654 321".to_string(),
        email_cliente: "rquispe@andinas.pe".to_string(),
        numero_proforma: "P001-2041".to_string(),
        fecha_emision: Some("15/03/2026".to_string()),
        plazo_entrega: "5 a 7 DIAS".to_string(),
        aprobada: true,
        items: vec![
            LineItem::new(1, 2.0, Some("UND"), "CALIBRACION DE BALANZA 300 KG"),
            LineItem::new(2, 1.0, None, "CALIBRACION DE BALANZA 500 KG"),
        ],
        total_items: Some(2),
        equipos: vec!["BALANZA 300 KG".to_string(), "BALANZA 500 KG".to_string()],
        descripcion_componente: Some("Celda de carga 500 kg".to_string()),
        actividades_incluidas: vec!["Limpieza general".to_string()],
        ..Default::default()
    }
}

pub fn record_with_items(n: u32) -> WorkOrderRecord {
    WorkOrderRecord {
        items: (1..=n)
            .map(|i| LineItem::new(i, 1.0, Some("NIU"), &format!("MANOMETRO MN-{:03}", i)))
            .collect(),
        total_items: Some(n),
        ..approved_record()
    }
}
