//! Runtime configuration read from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::work_order::common::default_logo_path;

pub const DEFAULT_OUTPUT_DIR: &str = "ordenes_generadas";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://audit_log.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub logo_path: PathBuf,
    pub theme_path: Option<PathBuf>,
    pub database_url: String,
    pub audit_enabled: bool,
    pub host: String,
    pub port: u16,
    pub max_payload_bytes: usize,
    pub soffice_bin: String,
    pub pdf_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            logo_path: default_logo_path(),
            theme_path: None,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            audit_enabled: true,
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_payload_bytes: 10 * 1024 * 1024,
            soffice_bin: "soffice".to_string(),
            pdf_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read every variable over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            output_dir: var("OT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            logo_path: var("OT_LOGO_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.logo_path),
            theme_path: var("OT_THEME_PATH").map(PathBuf::from),
            database_url: var("AUDIT_DATABASE_URL").unwrap_or(defaults.database_url),
            audit_enabled: match var("AUDIT_ENABLED") {
                Some(v) => parse_bool("AUDIT_ENABLED", &v)?,
                None => defaults.audit_enabled,
            },
            host: var("HOST").unwrap_or(defaults.host),
            port: match var("PORT") {
                Some(v) => parse_number("PORT", &v)?,
                None => defaults.port,
            },
            max_payload_bytes: match var("MAX_PAYLOAD_BYTES") {
                Some(v) => parse_number("MAX_PAYLOAD_BYTES", &v)?,
                None => defaults.max_payload_bytes,
            },
            soffice_bin: var("SOFFICE_BIN").unwrap_or(defaults.soffice_bin),
            pdf_timeout: match var("PDF_TIMEOUT_SECS") {
                Some(v) => Duration::from_secs(parse_number("PDF_TIMEOUT_SECS", &v)?),
                None => defaults.pdf_timeout,
            },
        })
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("ordenes_generadas"));
        assert_eq!(config.port, 5000);
        assert!(config.audit_enabled);
        assert_eq!(config.pdf_timeout, Duration::from_secs(30));
        assert_eq!(config.max_payload_bytes, 10_485_760);
        assert!(config.theme_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("OT_OUTPUT_DIR", "/tmp/ots"),
            ("AUDIT_ENABLED", "false"),
            ("PORT", "8080"),
            ("PDF_TIMEOUT_SECS", "5"),
            ("SOFFICE_BIN", "libreoffice"),
        ])
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/ots"));
        assert!(!config.audit_enabled);
        assert_eq!(config.port, 8080);
        assert_eq!(config.pdf_timeout, Duration::from_secs(5));
        assert_eq!(config.soffice_bin, "libreoffice");
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = config_from(&[("PORT", "cinco mil")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let err = config_from(&[("AUDIT_ENABLED", "quizas")]).unwrap_err();
        assert!(err.to_string().contains("AUDIT_ENABLED"));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("HOST", "  ")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
    }
}
