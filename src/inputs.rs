//! Input discovery

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const HTML_EXTENSION: &str = ".html";

/// List the `.html` files directly inside `dir`, sorted by file name.
pub fn html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(HTML_EXTENSION) {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
