//! Generic per-category content schema generator.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{debug, info};

use super::aggregate::BlockAggregate;
use super::examples::{block_name, example_files, observe_file};
use super::{DRAFT_07, GeneratedSchema};

/// Variant name used when a usage has no string `variant` attribute.
pub const DEFAULT_VARIANT: &str = "default";

/// Generates `<category>/<Block>.content.schema.json` documents.
#[derive(Debug, Clone)]
pub struct ContentSchemaGenerator {
    examples_dir: PathBuf,
    /// Explicit categories; empty means every subdirectory of `examples_dir`.
    categories: Vec<String>,
}

impl ContentSchemaGenerator {
    #[must_use]
    pub fn new(examples_dir: impl Into<PathBuf>, categories: Vec<String>) -> Self {
        Self {
            examples_dir: examples_dir.into(),
            categories,
        }
    }

    /// Categories that will be processed, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        if !self.categories.is_empty() {
            return self.categories.clone();
        }
        let Ok(entries) = std::fs::read_dir(&self.examples_dir) else {
            debug!(dir = %self.examples_dir.display(), "examples directory missing");
            return Vec::new();
        };
        let mut categories: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|ft| ft.is_dir()))
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .collect();
        categories.sort();
        categories
    }

    /// Infer one document per block with at least one usable example.
    #[must_use]
    pub fn generate(&self) -> Vec<GeneratedSchema> {
        let mut out = Vec::new();
        for category in self.categories() {
            let dir = self.examples_dir.join(&category);
            for block in aggregate_category(&dir) {
                if block.is_empty() {
                    debug!(%category, block = %block.name, "no usable examples, skipping");
                    continue;
                }
                out.push(render(&category, &block));
            }
        }
        info!(count = out.len(), "generated content schemas");
        out
    }
}

/// One aggregate per block name, in first-seen (sorted file) order.
fn aggregate_category(dir: &Path) -> Vec<BlockAggregate> {
    let mut blocks: Vec<BlockAggregate> = Vec::new();
    for file in example_files(dir) {
        let Some(name) = block_name(&file) else {
            continue;
        };
        let index = if let Some(i) = blocks.iter().position(|b| b.name == name) {
            i
        } else {
            blocks.push(BlockAggregate::new(name));
            blocks.len() - 1
        };
        let block = &mut blocks[index];
        let component = block.name.clone();
        observe_file(&file, &component, DEFAULT_VARIANT, block);
    }
    blocks
}

fn render(category: &str, block: &BlockAggregate) -> GeneratedSchema {
    let any_of: Vec<_> = block
        .variants
        .iter()
        .map(|v| {
            let mut schema = v.content_schema();
            schema["title"] = json!(v.name);
            schema
        })
        .collect();
    GeneratedSchema {
        block: block.name.clone(),
        relative_path: Path::new(category).join(format!("{}.content.schema.json", block.name)),
        document: json!({
            "$schema": DRAFT_07,
            "title": format!("{} content", block.name),
            "description": format!("Content accepted by the {} block, one entry per variant", block.name),
            "anyOf": any_of,
        }),
    }
}
