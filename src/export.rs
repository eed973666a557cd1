//! Export surface – naming and writing the generated `.html` file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Dialect;
use crate::error::ForgeError;

pub const DEFAULT_EXPORT_STEM: &str = "email-template";

/// `report.docx` → `report.html` (responsive) or `report-outlook.html`
/// (legacy). Without a source name the stem is `email-template`.
pub fn export_file_name(source: Option<&str>, dialect: Dialect) -> String {
    let stem = source
        .and_then(|s| Path::new(s).file_stem())
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_EXPORT_STEM);
    format!("{stem}{}.html", dialect.file_suffix())
}

/// Write `html` to `dir/file_name`, creating `dir` if needed.
pub fn write_export(dir: &Path, file_name: &str, html: &str) -> Result<PathBuf, ForgeError> {
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join(file_name);
    fs::write(&path, html)?;
    log::info!("wrote {} ({} bytes)", path.display(), html.len());
    Ok(path)
}
