//! Registry build: manifest in, published item documents and index out.
//!
//! The build is transactional. The manifest and every enriched item are
//! validated and rendered in memory before the first byte is written, so a
//! fatal error leaves the output directory exactly as it was. `index.json` is
//! flushed after every item document.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};
use ui8_config::Ui8Config;
use ui8_core::{
    ComponentKind, INDEX_SCHEMA_URL, IndexEntry, PublishedFile, PublishedItem,
    REGISTRY_ITEM_SCHEMA_URL, Registry, RegistryIndex, RegistryItem, is_plain_name,
};
use ui8_schema::registry::{CONFIG, INDEX, REGISTRY, REGISTRY_ITEM};
use ui8_schema::{SchemaError, SchemaRegistry};

use crate::error::BuildError;

/// File name of the aggregate index inside the output directory.
pub const INDEX_FILE: &str = "index.json";

/// Version stamped on the index when the manifest has none.
const DEFAULT_VERSION: &str = "1.0.0";

/// Inputs of [`build_registry`]. Relative paths resolve against `cwd`.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub manifest: PathBuf,
    pub cwd: PathBuf,
    pub output_dir: PathBuf,
    /// Optional `core-classes.json` copied next to the `lib` items.
    pub core_classes: Option<PathBuf>,
}

impl BuildOptions {
    #[must_use]
    pub fn from_config(config: &Ui8Config, cwd: &Path) -> Self {
        Self {
            manifest: PathBuf::from(&config.build.manifest),
            cwd: cwd.to_path_buf(),
            output_dir: PathBuf::from(&config.build.output_dir),
            core_classes: Some(PathBuf::from(&config.build.core_classes)),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Outcome of a successful build.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub items: usize,
    pub output_dir: PathBuf,
    /// Every file written, in write order (`index.json` last among registry files).
    pub written: Vec<PathBuf>,
    /// Non-fatal problems, e.g. a failed sidecar copy.
    pub warnings: Vec<String>,
}

/// Build the publishable registry from a manifest.
///
/// # Errors
///
/// Returns a [`BuildError`] for a missing or invalid manifest, a missing
/// source file, an item that fails the published-item schema, or an I/O
/// failure while flushing.
pub fn build_registry(options: &BuildOptions) -> Result<BuildReport, BuildError> {
    let schemas = SchemaRegistry::new();
    let manifest_path = options.resolve(&options.manifest);
    let output_dir = options.resolve(&options.output_dir);

    let manifest = read_manifest(&manifest_path, &schemas)?;
    debug!(items = manifest.items.len(), manifest = %manifest_path.display(), "manifest loaded");

    let published: Vec<PublishedItem> = manifest
        .items
        .par_iter()
        .map(|item| enrich(item, &options.cwd))
        .collect::<Result<_, _>>()?;

    let mut pending = PendingWrites::default();
    for item in &published {
        let value = serde_json::to_value(item)?;
        schemas
            .validate(REGISTRY_ITEM, &value)
            .map_err(|e| match e {
                SchemaError::ValidationFailed { errors } => BuildError::ItemInvalid {
                    item: item.name.clone(),
                    errors,
                },
                other => BuildError::Schema(other),
            })?;
        let path = output_dir
            .join(item.kind.folder())
            .join(format!("{}.json", item.name));
        pending.push(path, render(&value)?);
    }

    let index = serde_json::to_value(build_index(&manifest, &published))?;
    schemas.validate(INDEX, &index)?;
    let schema_root = output_dir.parent().map_or_else(|| output_dir.clone(), Path::to_path_buf);
    for (name, rel) in [
        (CONFIG, Path::new("schema.json").to_path_buf()),
        (REGISTRY, Path::new("schema").join("registry.json")),
        (REGISTRY_ITEM, Path::new("schema").join("registry-item.json")),
        (INDEX, Path::new("schema").join("index.json")),
    ] {
        let doc = schemas
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;
        pending.push(schema_root.join(rel), render(doc)?);
    }
    let index_rendered = render(&index)?;

    let mut report = BuildReport {
        items: published.len(),
        output_dir: output_dir.clone(),
        ..BuildReport::default()
    };
    report.written = pending.flush()?;
    let index_path = output_dir.join(INDEX_FILE);
    write_file(&index_path, &index_rendered)?;
    report.written.push(index_path);

    if let Some(core_classes) = &options.core_classes {
        copy_sidecar(&options.resolve(core_classes), &output_dir, &mut report);
    }

    info!(
        items = report.items,
        output = %output_dir.display(),
        warnings = report.warnings.len(),
        "registry built"
    );
    Ok(report)
}

fn read_manifest(path: &Path, schemas: &SchemaRegistry) -> Result<Registry, BuildError> {
    if !path.is_file() {
        return Err(BuildError::ManifestNotFound(path.to_path_buf()));
    }
    let raw = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| BuildError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;
    schemas.validate(REGISTRY, &value).map_err(|e| match e {
        SchemaError::ValidationFailed { errors } => BuildError::ManifestInvalid { errors },
        other => BuildError::Schema(other),
    })?;
    serde_json::from_value(value).map_err(|source| BuildError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Stamp the item schema and inline every file's content.
///
/// The name becomes `<folder>/<name>.json`, so it must be a plain file name.
fn enrich(item: &RegistryItem, cwd: &Path) -> Result<PublishedItem, BuildError> {
    if !is_plain_name(&item.name) {
        return Err(BuildError::ItemInvalid {
            item: item.name.clone(),
            errors: vec![format!(
                "name {:?} must be a single file name without separators or dot segments",
                item.name
            )],
        });
    }
    let files = item
        .files
        .iter()
        .map(|file| {
            let path = cwd.join(&file.path);
            if !path.is_file() {
                return Err(BuildError::MissingFile {
                    item: item.name.clone(),
                    path,
                });
            }
            let content =
                std::fs::read_to_string(&path).map_err(|source| BuildError::Io { path, source })?;
            Ok(PublishedFile {
                path: file.path.clone(),
                content,
                target: file.target.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PublishedItem {
        schema: REGISTRY_ITEM_SCHEMA_URL.to_string(),
        name: item.name.clone(),
        kind: item.kind,
        title: item.title.clone(),
        description: item.description.clone(),
        dependencies: item.dependencies.clone(),
        dev_dependencies: item.dev_dependencies.clone(),
        registry_dependencies: item.registry_dependencies.clone(),
        files,
    })
}

/// Thin projection of the published items. A later item with the same kind
/// and name replaces the earlier one, matching the file it overwrites.
fn build_index(manifest: &Registry, published: &[PublishedItem]) -> RegistryIndex {
    let mut components: Vec<IndexEntry> = Vec::new();
    for item in published {
        let entry = item.index_entry();
        match components
            .iter_mut()
            .find(|c| c.kind == entry.kind && c.name == entry.name)
        {
            Some(existing) => *existing = entry,
            None => components.push(entry),
        }
    }
    let categories = ComponentKind::ALL
        .iter()
        .filter(|k| components.iter().any(|c| c.kind == **k))
        .map(|k| k.folder().to_string())
        .collect();

    RegistryIndex {
        schema: INDEX_SCHEMA_URL.to_string(),
        registry: manifest.registry.clone(),
        version: manifest
            .version
            .clone()
            .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        last_updated: Utc::now().to_rfc3339(),
        categories,
        components,
    }
}

fn render<T: Serialize + ?Sized>(value: &T) -> Result<String, BuildError> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Rendered documents waiting to be flushed; a repeated path keeps the last body.
#[derive(Default)]
struct PendingWrites {
    order: Vec<PathBuf>,
    bodies: HashMap<PathBuf, String>,
}

impl PendingWrites {
    fn push(&mut self, path: PathBuf, body: String) {
        if self.bodies.insert(path.clone(), body).is_some() {
            debug!(path = %path.display(), "duplicate item, later definition wins");
        } else {
            self.order.push(path);
        }
    }

    fn flush(mut self) -> Result<Vec<PathBuf>, BuildError> {
        for path in &self.order {
            if let Some(body) = self.bodies.remove(path) {
                write_file(path, &body)?;
            }
        }
        Ok(self.order)
    }
}

fn write_file(path: &Path, body: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| BuildError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, body).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Copy `core-classes.json` into `<output>/lib/`. Never fatal.
fn copy_sidecar(source: &Path, output_dir: &Path, report: &mut BuildReport) {
    if !source.is_file() {
        debug!(source = %source.display(), "no core classes file, skipping");
        return;
    }
    let Some(file_name) = source.file_name() else {
        return;
    };
    let dest_dir = output_dir.join(ComponentKind::Lib.folder());
    let dest = dest_dir.join(file_name);
    let result = std::fs::create_dir_all(&dest_dir).and_then(|()| std::fs::copy(source, &dest));
    match result {
        Ok(_) => report.written.push(dest),
        Err(e) => {
            let message = format!("failed to copy {}: {e}", source.display());
            warn!(%message, "sidecar copy failed");
            report.warnings.push(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn published(name: &str, kind: ComponentKind, title: Option<&str>) -> PublishedItem {
        PublishedItem {
            schema: REGISTRY_ITEM_SCHEMA_URL.into(),
            name: name.into(),
            kind,
            title: title.map(str::to_string),
            description: None,
            dependencies: vec![],
            dev_dependencies: vec![],
            registry_dependencies: vec![],
            files: vec![PublishedFile {
                path: format!("src/{name}.tsx"),
                content: String::new(),
                target: None,
            }],
        }
    }

    #[test]
    fn index_dedups_and_lists_used_categories_in_kind_order() {
        let manifest = Registry {
            registry: Some("ui".into()),
            ..Registry::default()
        };
        let items = [
            published("Hero", ComponentKind::Block, None),
            published("Button", ComponentKind::Ui, None),
            published("Hero", ComponentKind::Block, Some("Hero v2")),
        ];
        let index = build_index(&manifest, &items);
        assert_eq!(index.categories, vec!["ui", "blocks"]);
        assert_eq!(index.components.len(), 2);
        assert_eq!(index.find("Hero").unwrap().title, "Hero v2");
        assert_eq!(index.version, DEFAULT_VERSION);
        assert_eq!(index.registry.as_deref(), Some("ui"));
        assert_eq!(index.schema, INDEX_SCHEMA_URL);
    }

    #[test]
    fn path_like_names_are_rejected_before_reading_files() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["../../escaped", "ui/Button", ".."] {
            let item = RegistryItem::scanned(name, ComponentKind::Ui, None, "src/ui/Button.tsx");
            let err = enrich(&item, tmp.path()).unwrap_err();
            assert!(
                matches!(&err, BuildError::ItemInvalid { item, .. } if item == name),
                "{name:?}: {err}"
            );
        }
    }

    #[test]
    fn pending_writes_keep_first_position_and_last_body() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.json");
        let b = tmp.path().join("b.json");
        let mut pending = PendingWrites::default();
        pending.push(a.clone(), "1".into());
        pending.push(b.clone(), "2".into());
        pending.push(a.clone(), "3".into());
        assert_eq!(pending.flush().unwrap(), vec![a.clone(), b]);
        assert_eq!(std::fs::read_to_string(a).unwrap(), "3");
    }

    #[test]
    fn sidecar_missing_source_is_silent() {
        let tmp = tempfile::tempdir().unwrap();
        let mut report = BuildReport::default();
        copy_sidecar(&tmp.path().join("nope.json"), tmp.path(), &mut report);
        assert!(report.written.is_empty());
        assert!(report.warnings.is_empty());
    }
}
