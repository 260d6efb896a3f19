//! Placement of published item files into a consumer project.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use ui8_core::{PublishedItem, is_plain_name, is_relative_target};

use crate::error::SourceError;

/// What `ui8kit add` will do with one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    Create,
    Overwrite,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub component: String,
    pub destination: PathBuf,
    pub action: FileAction,
    #[serde(skip)]
    pub content: String,
}

/// Destination of each file: `<source_dir>/<target or kind folder>/<file name>`.
///
/// Existing files are skipped unless `force` is set.
///
/// # Errors
///
/// Returns [`SourceError::Parse`] when a target is not a relative path of
/// plain segments or a file path has no file name, since either would place
/// the file outside `source_dir`.
pub fn plan_install(
    item: &PublishedItem,
    source_dir: &Path,
    force: bool,
) -> Result<Vec<PlannedFile>, SourceError> {
    item.files
        .iter()
        .map(|file| {
            let invalid = |message: String| SourceError::Parse {
                location: item.name.clone(),
                message,
            };
            let folder = match file.target.as_deref() {
                Some(target) if !is_relative_target(target) => {
                    return Err(invalid(format!("unsafe install target {target:?}")));
                }
                Some(target) => target,
                None => item.kind.folder(),
            };
            let file_name = Path::new(&file.path)
                .file_name()
                .and_then(|name| name.to_str())
                .filter(|name| is_plain_name(name))
                .ok_or_else(|| invalid(format!("file path {:?} has no file name", file.path)))?;
            let destination = source_dir.join(folder).join(file_name);
            let action = match (destination.exists(), force) {
                (false, _) => FileAction::Create,
                (true, true) => FileAction::Overwrite,
                (true, false) => FileAction::Skip,
            };
            Ok(PlannedFile {
                component: item.name.clone(),
                destination,
                action,
                content: file.content.clone(),
            })
        })
        .collect()
}

/// Write every non-skipped file, creating parent directories.
///
/// # Errors
///
/// Returns [`SourceError::Io`] on the first write failure.
pub fn apply_install(plan: &[PlannedFile]) -> Result<usize, SourceError> {
    let mut written = 0;
    for file in plan {
        if file.action == FileAction::Skip {
            debug!(path = %file.destination.display(), "exists, skipping");
            continue;
        }
        if let Some(parent) = file.destination.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SourceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&file.destination, &file.content).map_err(|source| SourceError::Io {
            path: file.destination.clone(),
            source,
        })?;
        written += 1;
    }
    Ok(written)
}
