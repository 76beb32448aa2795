//! Database module - AppState and database operations
//!
//! - `audit` - audit log schema and queries

mod audit;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::render::{DocumentConverter, SofficeConverter};
use crate::work_order::WorkOrderGenerator;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: AppConfig,
    pub generator: Arc<WorkOrderGenerator>,
    pub converter: Arc<dyn DocumentConverter>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let generator =
            WorkOrderGenerator::from_paths(config.theme_path.as_deref(), &config.logo_path)?;

        let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        let converter = Arc::new(SofficeConverter::new(
            config.soffice_bin.clone(),
            config.pdf_timeout,
        ));

        Ok(Self::new_with_pool(pool, config, generator, converter).await?)
    }

    /// Assemble the state around an existing pool, creating the audit schema.
    pub async fn new_with_pool(
        pool: SqlitePool,
        config: AppConfig,
        generator: WorkOrderGenerator,
        converter: Arc<dyn DocumentConverter>,
    ) -> Result<Self, sqlx::Error> {
        let state = AppState {
            pool,
            config,
            generator: Arc::new(generator),
            converter,
        };
        state.init_audit_schema().await?;
        Ok(state)
    }
}
