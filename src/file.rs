// src/file.rs

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use crate::core::csv::{to_export_string, Delim};
use crate::runner::ScoredRecord;

/// Write the augmented table as CSV/TSV. Returns the path written.
pub fn write_table(
    path: &Path,
    headers: &Option<Vec<String>>,
    rows: &[Vec<String>],
    include_headers: bool,
    delim: Delim,
) -> Result<PathBuf, Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let contents = to_export_string(headers, rows, include_headers, delim);
    fs::write(path, contents)?;
    Ok(path.to_path_buf())
}

/// Write scored records as a JSON array.
pub fn write_records_json(path: &Path, records: &[ScoredRecord]) -> Result<PathBuf, Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let contents = serde_json::to_string_pretty(records)?;
    fs::write(path, contents)?;
    Ok(path.to_path_buf())
}

/// Resolve `-o` into a concrete file path. Empty → default filename in the
/// working directory; a directory (existing or trailing-slash hint) gets the
/// default filename appended.
pub fn resolve_out_path(
    user_o: Option<&Path>,
    default_dir: &str,
    stem: &str,
    ext: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let default_name = join!(stem, ".", ext);
    let Some(p) = user_o else {
        let dir = PathBuf::from(default_dir);
        ensure_directory(&dir)?;
        return Ok(dir.join(default_name));
    };

    let p = PathBuf::from(normalize_separators(&p.to_string_lossy()));
    if looks_like_dir_hint(&p) || p.is_dir() {
        ensure_directory(&p)?;
        Ok(p.join(default_name))
    } else {
        Ok(p)
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c == '/' || c == '\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
