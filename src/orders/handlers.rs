use std::path::PathBuf;

use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{error, web, HttpRequest, HttpResponse, Responder};
use chrono::Local;
use log::{debug, error, info, warn};

use crate::audit::models::NewAuditEntry;
use crate::orders::models::{ProcessQuery, ProcessResponse};
use crate::render::ConvertError;
use crate::work_order::common::{safe_download_name, with_extension};
use crate::work_order::{GenerationOutcome, Generator, GeneratorError, WorkOrderRecord};
use crate::{AppState, ErrorResponse};

/// JSON extractor settings: body limit and errors reported as [`ErrorResponse`].
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let message = err.to_string();
            warn!("Rejected request body: {}", message);
            error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message)),
            )
            .into()
        })
}

fn attachment(filename: &str) -> ContentDisposition {
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(filename.to_string())],
    }
}

#[utoipa::path(
    post,
    path = "/api/ordenes",
    tag = "Work Order Service",
    params(ProcessQuery),
    request_body = WorkOrderRecord,
    responses(
        (status = 200, description = "Work order generated, or proforma not approved", body = ProcessResponse),
        (status = 400, description = "Invalid record", body = ErrorResponse),
        (status = 409, description = "A document with the same OT number already exists", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn process_order(
    req: HttpRequest,
    data: web::Data<AppState>,
    query: web::Query<ProcessQuery>,
    payload: web::Json<WorkOrderRecord>,
) -> impl Responder {
    let mut record = payload.into_inner();
    info!(
        "Executing process_order handler for proforma {}",
        record.numero_proforma
    );

    match query.approval() {
        Ok(Some(aprobada)) => record.aprobada = aprobada,
        Ok(None) => {}
        Err(value) => {
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!(
                "Estado no válido: '{}'. Use 'aprobada' o 'rechazada'",
                value
            )))
        }
    }

    let generator = data.generator.clone();
    let output_dir = data.config.output_dir.clone();
    let job_record = record.clone();
    let result = web::block(move || -> Result<_, GeneratorError> {
        let outcome = generator.generate(&job_record)?;
        let path = match &outcome {
            GenerationOutcome::Generated(doc) => Some(doc.write_to(&output_dir)?),
            GenerationOutcome::NotApproved { .. } => None,
        };
        Ok((outcome, path))
    })
    .await;

    let (outcome, path) = match result {
        Ok(Ok(done)) => done,
        Ok(Err(GeneratorError::InvalidRecord(message))) => {
            warn!("Invalid record for {}: {}", record.numero_proforma, message);
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
        }
        Ok(Err(GeneratorError::AlreadyExists(path))) => {
            warn!(
                "OT number collision for {}: {} already exists",
                record.numero_proforma,
                path.display()
            );
            return HttpResponse::Conflict().json(ErrorResponse::conflict(
                "Número de OT duplicado. Intente nuevamente.",
            ));
        }
        Ok(Err(e)) => {
            error!("Failed to generate OT for {}: {}", record.numero_proforma, e);
            return HttpResponse::InternalServerError().json(ErrorResponse::internal_error(
                &format!("Error al generar OT: {}", e),
            ));
        }
        Err(e) => {
            error!("Generation task failed: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Error al generar OT"));
        }
    };

    let doc = match outcome {
        GenerationOutcome::NotApproved { numero_proforma } => {
            info!("Proforma {} no aprobada. No se genera OT.", numero_proforma);
            return HttpResponse::Ok().json(ProcessResponse::rejected(&numero_proforma));
        }
        GenerationOutcome::Generated(doc) => doc,
    };
    let filepath = path.map(|p| p.to_string_lossy().into_owned());
    info!(
        "OT {} written to {}",
        doc.identifiers.ot_number,
        filepath.as_deref().unwrap_or_default()
    );

    if data.config.audit_enabled {
        let entry =
            NewAuditEntry::from_generation(&record, &doc.identifiers, Local::now().naive_local())
                .with_ip_address(req.peer_addr().map(|addr| addr.ip().to_string()));
        match data.register_ot(&entry, filepath.as_deref()).await {
            Ok(true) => debug!("Audit entry stored for {}", doc.identifiers.ot_number),
            Ok(false) => warn!(
                "OT number {} collided with an existing audit entry",
                doc.identifiers.ot_number
            ),
            Err(e) => error!(
                "Failed to register {} in the audit log: {}",
                doc.identifiers.ot_number, e
            ),
        }
    }

    HttpResponse::Ok().json(ProcessResponse::generated(&record, &doc))
}

#[utoipa::path(
    get,
    path = "/descargar/{filename}",
    tag = "Work Order Service",
    params(
        ("filename" = String, Path, description = "Generated .docx file name")
    ),
    responses(
        (status = 200, description = "Word document", body = String, content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 400, description = "Invalid file name", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn download_docx(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let requested = path.into_inner();
    info!("Executing download_docx handler for {}", requested);

    let Some(name) = safe_download_name(&requested, "docx") else {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request("Archivo no válido"));
    };

    let file_path = data.config.output_dir.join(&name);
    match NamedFile::open_async(&file_path).await {
        Ok(file) => file
            .set_content_disposition(attachment(&name))
            .into_response(&req),
        Err(e) => {
            debug!("{} not served: {}", file_path.display(), e);
            HttpResponse::NotFound().json(ErrorResponse::not_found("Archivo no encontrado"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/descargar-pdf/{filename}",
    tag = "Work Order Service",
    params(
        ("filename" = String, Path, description = "PDF name of a generated work order")
    ),
    responses(
        (status = 200, description = "PDF document", body = String, content_type = "application/pdf"),
        (status = 400, description = "Invalid file name", body = ErrorResponse),
        (status = 404, description = "Word document not found", body = ErrorResponse),
        (status = 500, description = "Conversion failed or timed out", body = ErrorResponse),
        (status = 501, description = "LibreOffice not installed", body = ErrorResponse)
    )
)]
pub async fn download_pdf(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let requested = path.into_inner();
    info!("Executing download_pdf handler for {}", requested);

    let Some(pdf_name) = safe_download_name(&requested, "pdf") else {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request("Archivo no válido"));
    };

    let docx_path = data.config.output_dir.join(with_extension(&pdf_name, "docx"));
    if !docx_path.is_file() {
        return HttpResponse::NotFound()
            .json(ErrorResponse::not_found("Archivo Word no encontrado"));
    }

    let pdf_path: PathBuf = data.config.output_dir.join(&pdf_name);
    if let Ok(file) = NamedFile::open_async(&pdf_path).await {
        debug!("Serving cached {}", pdf_path.display());
        return file
            .set_content_disposition(attachment(&pdf_name))
            .into_response(&req);
    }

    let bytes = match data.converter.to_pdf(&docx_path).await {
        Ok(bytes) => bytes,
        Err(ConvertError::NotInstalled(binary)) => {
            warn!("PDF requested but {} is not installed", binary);
            return HttpResponse::NotImplemented().json(ErrorResponse::not_implemented(
                "LibreOffice no instalado. Solo disponible descarga en Word.",
            ));
        }
        Err(ConvertError::Timeout(_)) => {
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Timeout al convertir a PDF"));
        }
        Err(e) => {
            error!("Failed to convert {}: {}", docx_path.display(), e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&format!("Error al convertir: {}", e)));
        }
    };

    if let Err(e) = tokio::fs::write(&pdf_path, &bytes).await {
        warn!("Could not cache {}: {}", pdf_path.display(), e);
    }

    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(attachment(&pdf_name))
        .body(bytes)
}

#[utoipa::path(
    get,
    path = "/logo",
    tag = "Work Order Service",
    responses(
        (status = 200, description = "Company logo", body = String, content_type = "image/png"),
        (status = 404, description = "Logo not available")
    )
)]
pub async fn serve_logo(data: web::Data<AppState>) -> HttpResponse {
    match data.generator.logo() {
        Some(bytes) => HttpResponse::Ok()
            .content_type("image/png")
            .body(bytes.to_vec()),
        None => match tokio::fs::read(&data.config.logo_path).await {
            Ok(bytes) => HttpResponse::Ok().content_type("image/png").body(bytes),
            Err(e) => {
                debug!("Logo not available: {}", e);
                HttpResponse::NotFound().finish()
            }
        },
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/ordenes").route(web::post().to(process_order)))
        .service(web::resource("/descargar/{filename}").route(web::get().to(download_docx)))
        .service(web::resource("/descargar-pdf/{filename}").route(web::get().to(download_pdf)))
        .service(web::resource("/logo").route(web::get().to(serve_logo)));
}
