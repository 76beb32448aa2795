mod common;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use metromecanica_ot::audit::AuditFilter;
use metromecanica_ot::orders::handlers::json_config;
use metromecanica_ot::orders::models::ProcessResponse;
use metromecanica_ot::work_order::{StyleTheme, WorkOrderGenerator};
use metromecanica_ot::{audit, orders, AppState, ErrorResponse};
use tempfile::tempdir;

use common::{
    approved_record, frozen_clock, record_with_items, test_state, test_state_with_generator,
    StubBehaviour, StubConverter, STUB_PDF,
};

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .app_data(json_config(1024 * 1024))
                .configure(orders::handlers::config)
                .configure(audit::handlers::config),
        )
        .await
    };
}

async fn data(
    dir: &Path,
    audit_enabled: bool,
    behaviour: StubBehaviour,
) -> (web::Data<AppState>, Arc<StubConverter>) {
    let converter = Arc::new(StubConverter::new(behaviour));
    let state = test_state(dir, audit_enabled, converter.clone()).await;
    (web::Data::new(state), converter)
}

fn content_disposition(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_web::test]
async fn test_process_approved_record() {
    let dir = tempdir().unwrap();
    let (state, _) = data(dir.path(), true, StubBehaviour::Succeed).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/ordenes")
        .set_json(approved_record())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: ProcessResponse = test::read_body_json(resp).await;
    assert!(body.aprobada);
    assert_eq!(body.numero_proforma, "P001-2041");
    assert_eq!(body.cliente.as_deref(), Some("INDUSTRIAS ANDINAS S.A.C."));
    assert_eq!(body.contacto_cliente.as_deref(), Some("Rosa Quispe"));
    assert_eq!(body.fecha_emision.as_deref(), Some("15/03/2026"));
    assert_eq!(body.modo.as_deref(), Some("itemized"));
    assert_eq!(body.equipos.as_ref().map(Vec::len), Some(2));

    let ot_num = body.ot_num.unwrap();
    assert!(ot_num.starts_with("OT-2026-"));
    let filename = body.filename.unwrap();
    assert_eq!(filename, format!("{}.docx", ot_num));
    assert!(dir.path().join(&filename).is_file());

    let entries = state.audit_entries(&AuditFilter::default()).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].ot_number, ot_num);
}

#[actix_web::test]
async fn test_repeated_ot_number_keeps_first_document() {
    let dir = tempdir().unwrap();
    let generator =
        WorkOrderGenerator::new(StyleTheme::metromecanica(), None).with_clock(frozen_clock);
    let state = web::Data::new(
        test_state_with_generator(
            dir.path(),
            true,
            Arc::new(StubConverter::new(StubBehaviour::Succeed)),
            generator,
        )
        .await,
    );
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/ordenes")
        .set_json(approved_record())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ProcessResponse = test::read_body_json(resp).await;
    assert_eq!(body.ot_num.as_deref(), Some("OT-2026-4321"));

    let docx = dir.path().join("OT-2026-4321.docx");
    let first = fs::read(&docx).unwrap();
    // PDF cached for the first document
    fs::write(dir.path().join("OT-2026-4321.pdf"), STUB_PDF).unwrap();

    let second = record_with_items(6);
    let req = test::TestRequest::post()
        .uri("/api/ordenes")
        .set_json(&second)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let error: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(error.error, "Conflict");

    assert_eq!(fs::read(&docx).unwrap(), first);
    let entries = state.audit_entries(&AuditFilter::default()).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].total_items, 2);
}

#[actix_web::test]
async fn test_process_compact_layout() {
    let dir = tempdir().unwrap();
    let (state, _) = data(dir.path(), false, StubBehaviour::Succeed).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/ordenes")
        .set_json(record_with_items(8))
        .to_request();
    let body: ProcessResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.modo.as_deref(), Some("compact"));
}

#[actix_web::test]
async fn test_process_rejected_by_estado_override() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("ordenes_generadas");
    let (state, _) = data(&out, true, StubBehaviour::Succeed).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/ordenes?estado=rechazada")
        .set_json(approved_record())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        serde_json::json!({"aprobada": false, "numero_proforma": "P001-2041"})
    );
    assert!(!out.exists());
    assert!(state
        .audit_entries(&AuditFilter::default())
        .await
        .unwrap()
        .is_empty());
}

#[actix_web::test]
async fn test_process_rejects_unknown_estado() {
    let dir = tempdir().unwrap();
    let (state, _) = data(dir.path(), true, StubBehaviour::Succeed).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/ordenes?estado=pendiente")
        .set_json(approved_record())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_process_invalid_json_is_bad_request() {
    let dir = tempdir().unwrap();
    let (state, _) = data(dir.path(), true, StubBehaviour::Succeed).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/ordenes")
        .insert_header(header::ContentType::json())
        .set_payload(r#"{"cliente": "ACME"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "BadRequest");
}

#[actix_web::test]
async fn test_process_blank_item_is_bad_request() {
    let dir = tempdir().unwrap();
    let (state, _) = data(dir.path(), true, StubBehaviour::Succeed).await;
    let app = app!(state);

    let mut record = approved_record();
    record.items[0].descripcion = "   ".to_string();
    let req = test::TestRequest::post()
        .uri("/api/ordenes")
        .set_json(record)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_download_docx() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("OT-2026-0123.docx"), b"PK\x03\x04").unwrap();
    let (state, _) = data(dir.path(), true, StubBehaviour::Succeed).await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/descargar/OT-2026-0123.docx")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(content_disposition(&resp).contains("OT-2026-0123.docx"));
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"PK\x03\x04");
}

#[actix_web::test]
async fn test_download_docx_errors() {
    let dir = tempdir().unwrap();
    let (state, _) = data(dir.path(), true, StubBehaviour::Succeed).await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/descargar/OT-2026-0123.pdf")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri("/descargar/..%2Fsecret.docx")
        .to_request();
    let status = test::call_service(&app, req).await.status();
    assert!(status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/descargar/OT-2026-9999.docx")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_download_pdf_converts_and_caches() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("OT-2026-0123.docx"), b"PK\x03\x04").unwrap();
    let (state, converter) = data(dir.path(), true, StubBehaviour::Succeed).await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/descargar-pdf/OT-2026-0123.pdf")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(content_disposition(&resp).contains("OT-2026-0123.pdf"));
    assert_eq!(&test::read_body(resp).await[..], STUB_PDF);
    assert_eq!(fs::read(dir.path().join("OT-2026-0123.pdf")).unwrap(), STUB_PDF);

    // second request is served from the cached file
    let req = test::TestRequest::get()
        .uri("/descargar-pdf/OT-2026-0123.pdf")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(converter.calls(), 1);
}

#[actix_web::test]
async fn test_download_pdf_requires_docx() {
    let dir = tempdir().unwrap();
    let (state, converter) = data(dir.path(), true, StubBehaviour::Succeed).await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/descargar-pdf/OT-2026-0123.pdf")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::get()
        .uri("/descargar-pdf/OT-2026-0123.docx")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(converter.calls(), 0);
}

#[actix_web::test]
async fn test_download_pdf_converter_failures() {
    for (behaviour, expected) in [
        (StubBehaviour::NotInstalled, StatusCode::NOT_IMPLEMENTED),
        (StubBehaviour::Timeout, StatusCode::INTERNAL_SERVER_ERROR),
        (StubBehaviour::Exit, StatusCode::INTERNAL_SERVER_ERROR),
    ] {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("OT-2026-0123.docx"), b"PK\x03\x04").unwrap();
        let (state, _) = data(dir.path(), true, behaviour).await;
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/descargar-pdf/OT-2026-0123.pdf")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected, "{:?}", behaviour);
        assert!(!dir.path().join("OT-2026-0123.pdf").exists());
    }
}

#[actix_web::test]
async fn test_logo_missing_is_not_found() {
    let dir = tempdir().unwrap();
    let (state, _) = data(dir.path(), true, StubBehaviour::Succeed).await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/logo").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_logo_is_served_from_config_path() {
    let dir = tempdir().unwrap();
    let (state, _) = data(dir.path(), true, StubBehaviour::Succeed).await;
    fs::write(&state.config.logo_path, b"\x89PNG\r\n\x1a\n").unwrap();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/logo").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
}

#[actix_web::test]
async fn test_audit_endpoints_disabled() {
    let dir = tempdir().unwrap();
    let (state, _) = data(dir.path(), false, StubBehaviour::Succeed).await;
    let app = app!(state);

    for uri in ["/auditoria/exportar", "/auditoria/estadisticas"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE, "{}", uri);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "ServiceUnavailable");
    }
}

#[actix_web::test]
async fn test_audit_export_empty_is_not_found() {
    let dir = tempdir().unwrap();
    let (state, _) = data(dir.path(), true, StubBehaviour::Succeed).await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/auditoria/exportar")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_audit_export_and_statistics_after_generation() {
    let dir = tempdir().unwrap();
    let (state, _) = data(dir.path(), true, StubBehaviour::Succeed).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/ordenes")
        .set_json(approved_record())
        .to_request();
    let body: ProcessResponse = test::call_and_read_body_json(&app, req).await;
    let ot_num = body.ot_num.unwrap();

    let req = test::TestRequest::get()
        .uri("/auditoria/exportar")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(content_disposition(&resp).contains("auditoria_inacal_"));
    let csv = test::read_body(resp).await;
    assert!(csv.starts_with(b"\xEF\xBB\xBF"));
    assert!(String::from_utf8_lossy(&csv).contains(&ot_num));

    let req = test::TestRequest::get()
        .uri("/auditoria/estadisticas")
        .to_request();
    let stats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["total_ots"], 1);
    assert_eq!(stats["clientes_unicos"], 1);
}
