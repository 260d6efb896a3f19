//! Source file discovery.
//!
//! Uses the `ignore` crate with every standard filter disabled: component
//! directories are walked completely, hidden files and gitignored paths
//! included, so a scan never depends on the user's VCS setup.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use ui8_parser::is_source_file;

/// Every script source below `root`, sorted by path.
#[must_use]
pub fn source_files(root: &Path) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.hidden(false);

    let mut files: Vec<PathBuf> = builder
        .build()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
        .map(ignore::DirEntry::into_path)
        .filter(|p| is_source_file(p))
        .collect();
    files.sort();
    files
}

/// `path` relative to `base` with forward slashes; unrelated paths are kept whole.
#[must_use]
pub fn relative_path(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
