//! Dependency resolver: re-reads an item's files and derives its npm packages.

use std::path::Path;

use tracing::warn;
use ui8_core::RegistryItem;
use ui8_parser::{analyze_file, external_dependencies};

/// External packages imported by any of `item`'s files, first-sight order.
///
/// Each file is read fresh from disk. Files that cannot be read or parsed
/// contribute nothing.
#[must_use]
pub fn resolve_dependencies(
    item: &RegistryItem,
    cwd: &Path,
    workspace_prefixes: &[String],
) -> Vec<String> {
    let mut specifiers: Vec<String> = Vec::new();
    for file in &item.files {
        match analyze_file(&cwd.join(&file.path), &file.path) {
            Ok(analysis) => specifiers.extend(analysis.dependencies),
            Err(e) => {
                warn!(item = %item.name, file = %file.path, error = %e, "cannot resolve dependencies");
            }
        }
    }
    external_dependencies(specifiers.iter().map(String::as_str), workspace_prefixes)
}

/// Resolve and store the dependencies of `item`.
pub fn apply_dependencies(item: &mut RegistryItem, cwd: &Path, workspace_prefixes: &[String]) {
    item.dependencies = resolve_dependencies(item, cwd, workspace_prefixes);
}
