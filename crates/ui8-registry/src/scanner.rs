//! Directory scanner: component sources to manifest entries.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};
use ui8_config::Ui8Config;
use ui8_core::{ComponentKind, REGISTRY_SCHEMA_URL, Registry, RegistryItem};
use ui8_parser::analyze_file;

use crate::resolver::apply_dependencies;
use crate::walk::{relative_path, source_files};

/// Inputs of [`scan_project`].
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Project root; file paths in the manifest are relative to it.
    pub cwd: PathBuf,
    /// Directories to scan, one per kind, in scan order.
    pub sources: Vec<(ComponentKind, PathBuf)>,
    pub registry_name: String,
    pub version: String,
    pub workspace_prefixes: Vec<String>,
}

impl ScanOptions {
    /// Scan `<source_dir>/<folder>` for every kind, in the canonical kind order.
    #[must_use]
    pub fn from_config(config: &Ui8Config, cwd: &Path, source_dir: Option<&Path>) -> Self {
        let source_root = source_dir.map_or_else(
            || cwd.join(&config.scan.source_dir),
            |dir| cwd.join(dir),
        );
        Self {
            cwd: cwd.to_path_buf(),
            sources: ComponentKind::ALL
                .iter()
                .map(|kind| (*kind, source_root.join(kind.folder())))
                .collect(),
            registry_name: config.registry.name.clone(),
            version: config.registry.version.clone(),
            workspace_prefixes: config.scan.workspace_prefixes.clone(),
        }
    }
}

/// Whether a file stem is excluded from the registry (`index`, `_private`).
fn is_excluded(stem: &str) -> bool {
    stem == "index" || stem.starts_with('_')
}

/// Scan one directory for components of `kind`.
///
/// A missing directory yields an empty list. Files that cannot be read or
/// parsed are logged and skipped, as are files without exports.
#[must_use]
pub fn scan_directory(root: &Path, kind: ComponentKind, cwd: &Path) -> Vec<RegistryItem> {
    if !root.is_dir() {
        debug!(root = %root.display(), %kind, "source directory missing, skipping");
        return Vec::new();
    }

    let files: Vec<PathBuf> = source_files(root)
        .into_iter()
        .filter(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|stem| !is_excluded(stem))
        })
        .collect();

    files
        .par_iter()
        .filter_map(|path| {
            let rel = relative_path(path, cwd);
            let analysis = match analyze_file(path, &rel) {
                Ok(analysis) => analysis,
                Err(e) => {
                    warn!(file = %rel, error = %e, "skipping unparseable file");
                    return None;
                }
            };
            if !analysis.has_exports {
                debug!(file = %rel, "no exports, skipping");
                return None;
            }
            let name = path.file_stem()?.to_str()?.to_string();
            Some(RegistryItem::scanned(name, kind, analysis.description, rel))
        })
        .collect()
}

/// Scan every configured directory and resolve dependencies.
///
/// The result carries no timestamp, so repeated scans of an unchanged tree
/// serialize identically.
#[must_use]
pub fn scan_project(options: &ScanOptions) -> Registry {
    let mut items = Vec::new();
    for (kind, dir) in &options.sources {
        let found = scan_directory(dir, *kind, &options.cwd);
        debug!(%kind, count = found.len(), "scanned directory");
        items.extend(found);
    }

    items
        .par_iter_mut()
        .for_each(|item| apply_dependencies(item, &options.cwd, &options.workspace_prefixes));

    info!(items = items.len(), registry = %options.registry_name, "scan complete");
    Registry {
        schema: Some(REGISTRY_SCHEMA_URL.to_string()),
        registry: Some(options.registry_name.clone()),
        version: Some(options.version.clone()),
        last_updated: None,
        items,
    }
}
