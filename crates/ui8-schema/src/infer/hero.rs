//! Hero props schema generator.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tracing::{debug, info};

use super::aggregate::{BlockAggregate, VariantAggregate};
use super::examples::{example_files, observe_file};
use super::{DRAFT_07, GeneratedSchema};

/// Output subdirectory of every hero document.
const HERO_DIR: &str = "hero";

/// Hero blocks and the variant assumed when a usage names none.
pub const HERO_BLOCKS: &[(&str, &str)] = &[("CenteredHero", "simple"), ("SplitHero", "media")];

/// Generates `hero/<Block>.props.schema.json` documents.
#[derive(Debug, Clone)]
pub struct HeroSchemaGenerator {
    examples_dir: PathBuf,
}

impl HeroSchemaGenerator {
    #[must_use]
    pub fn new(examples_dir: impl Into<PathBuf>) -> Self {
        Self {
            examples_dir: examples_dir.into(),
        }
    }

    /// Mine every example file under the examples root for hero usages.
    #[must_use]
    pub fn generate(&self) -> Vec<GeneratedSchema> {
        let files = example_files(&self.examples_dir);
        let mut out = Vec::new();
        for (component, fallback) in HERO_BLOCKS {
            let mut block = BlockAggregate::new(*component);
            for file in &files {
                observe_file(file, component, fallback, &mut block);
            }
            if block.is_empty() {
                debug!(block = *component, "no usable examples, skipping");
                continue;
            }
            out.push(render(&block));
        }
        info!(count = out.len(), "generated hero schemas");
        out
    }
}

fn render(block: &BlockAggregate) -> GeneratedSchema {
    let any_of: Vec<Value> = block.variants.iter().map(variant_entry).collect();
    GeneratedSchema {
        block: block.name.clone(),
        relative_path: Path::new(HERO_DIR).join(format!("{}.props.schema.json", block.name)),
        document: json!({
            "$schema": DRAFT_07,
            "title": format!("{} props", block.name),
            "description": format!("Props accepted by {}, discriminated by variant", block.name),
            "anyOf": any_of,
        }),
    }
}

fn variant_entry(variant: &VariantAggregate) -> Value {
    let mut props = Map::new();
    props.insert("content".into(), variant.content_schema());
    for (name, shape) in &variant.props {
        props.insert(name.clone(), shape.to_json());
    }
    json!({
        "type": "object",
        "properties": {
            "variant": { "const": variant.name },
            "props": {
                "type": "object",
                "properties": props,
                "required": ["content"],
            },
        },
        "required": ["variant", "props"],
    })
}
