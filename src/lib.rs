use std::io;

use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod audit;
pub mod config;
pub mod db;
pub mod input;
pub mod orders;
pub mod render;
pub mod work_order;

pub use crate::config::AppConfig;
pub use crate::db::AppState;

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn conflict(message: &str) -> Self {
        Self::new("Conflict", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }

    pub fn service_unavailable(message: &str) -> Self {
        Self::new("ServiceUnavailable", message)
    }

    pub fn not_implemented(message: &str) -> Self {
        Self::new("NotImplemented", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::orders::handlers::process_order,
        crate::orders::handlers::download_docx,
        crate::orders::handlers::download_pdf,
        crate::orders::handlers::serve_logo,
        crate::audit::handlers::export_audit,
        crate::audit::handlers::audit_statistics
    ),
    components(
        schemas(
            work_order::models::WorkOrderRecord,
            work_order::models::LineItem,
            work_order::layout::LayoutMode,
            orders::models::ProcessResponse,
            audit::models::AuditStats,
            audit::models::MonthCount,
            audit::models::ServiceTypeCount,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Work Order Service", description = "Work order generation and download endpoints."),
        (name = "Audit Service", description = "Audit trail export and statistics.")
    ),
    servers(
        (url = "http://127.0.0.1:5000", description = "Localhost server")
    )
)]
pub struct ApiDoc;

/// Initialise `env_logger` with an `info` default. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

pub async fn run(config: AppConfig) -> io::Result<()> {
    init_logging();

    let bind = (config.host.clone(), config.port);
    let max_payload = config.max_payload_bytes;

    let app_state = match AppState::new(config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!(
                "Failed to initialise application state. Check AUDIT_DATABASE_URL and OT_THEME_PATH. Error: {}",
                e
            );
            return Err(io::Error::other(e.to_string()));
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("metromecanica_ot")
        .endpoint("/metrics")
        .build()
        .map_err(|e| io::Error::other(e.to_string()))?;

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:5000")
            .allowed_origin("http://127.0.0.1:5000")
            .allowed_origin("http://localhost:3000")
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .app_data(orders::handlers::json_config(max_payload))
            .configure(orders::handlers::config)
            .configure(audit::handlers::config)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(bind)?
    .run()
    .await
}
