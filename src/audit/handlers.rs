use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use chrono::Local;
use log;

use crate::audit::export::{export_audit_csv, export_filename};
use crate::audit::models::{AuditFilter, AuditStats};
use crate::{AppState, ErrorResponse};

/// Window covered by the export endpoint.
pub const EXPORT_WINDOW_DAYS: i64 = 365;

const AUDIT_UNAVAILABLE: &str = "Sistema de auditoría no disponible";

#[utoipa::path(
    get,
    path = "/auditoria/exportar",
    tag = "Audit Service",
    responses(
        (status = 200, description = "CSV export of the last year of work orders", body = String, content_type = "text/csv"),
        (status = 404, description = "No audit entries in range", body = ErrorResponse),
        (status = 503, description = "Audit log disabled", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn export_audit(data: web::Data<AppState>) -> impl Responder {
    log::info!("Exporting audit log");

    if !data.config.audit_enabled {
        return HttpResponse::ServiceUnavailable()
            .json(ErrorResponse::service_unavailable(AUDIT_UNAVAILABLE));
    }

    let today = Local::now().date_naive();
    let filter = AuditFilter::last_days(today, EXPORT_WINDOW_DAYS);

    let entries = match data.audit_entries(&filter).await {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("Failed to read audit log: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to read audit log"));
        }
    };
    log::debug!("{} audit entries in export window", entries.len());

    match export_audit_csv(&entries) {
        Ok(Some(bytes)) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(export_filename(today))],
            })
            .body(bytes),
        Ok(None) => HttpResponse::NotFound()
            .json(ErrorResponse::not_found("No hay registros para exportar")),
        Err(e) => {
            log::error!("Failed to build audit CSV: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to build audit export"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/auditoria/estadisticas",
    tag = "Audit Service",
    responses(
        (status = 200, description = "Audit statistics", body = AuditStats),
        (status = 503, description = "Audit log disabled", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn audit_statistics(data: web::Data<AppState>) -> impl Responder {
    log::info!("Fetching audit statistics");

    if !data.config.audit_enabled {
        return HttpResponse::ServiceUnavailable()
            .json(ErrorResponse::service_unavailable(AUDIT_UNAVAILABLE));
    }

    match data.audit_statistics().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            log::error!("Failed to compute audit statistics: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to compute audit statistics"))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auditoria")
            .route("/exportar", web::get().to(export_audit))
            .route("/estadisticas", web::get().to(audit_statistics)),
    );
}
