//! Common helpers for file naming and static assets.

use std::path::{Path, PathBuf};

use sanitize_filename::sanitize;

/// Get the static assets directory path.
pub fn get_static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

/// Default location of the company logo.
pub fn default_logo_path() -> PathBuf {
    get_static_dir().join("logo_metromecanica.png")
}

/// File name for a work order number and extension.
pub fn document_filename(ot_number: &str, extension: &str) -> String {
    format!("{}.{}", sanitize(ot_number), extension)
}

/// Validate a requested download name.
///
/// Returns the name only if it is a bare file name (no directory parts,
/// nothing the sanitizer would change) with the expected extension.
pub fn safe_download_name(requested: &str, extension: &str) -> Option<String> {
    let base = Path::new(requested).file_name()?.to_str()?;
    if base != requested || sanitize(base) != base || base.starts_with('.') {
        return None;
    }
    let stem = base.strip_suffix(extension)?.strip_suffix('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(base.to_string())
}

/// Swap the extension of a validated file name.
pub fn with_extension(name: &str, extension: &str) -> String {
    Path::new(name)
        .with_extension(extension)
        .to_string_lossy()
        .into_owned()
}
