//! Schema inference from example usage files.
//!
//! Example files render a block with literal content, for instance
//! `<Hero variant="split" content={heroContent} />`. The engine converts each
//! content literal into an [`InferredSchema`], folds the examples of each
//! variant into a [`VariantAggregate`], and emits one schema document per
//! block through either generator:
//!
//! - [`ContentSchemaGenerator`]: `<category>/<Block>.content.schema.json`, an
//!   `anyOf` of content object schemas, one per variant
//! - [`HeroSchemaGenerator`]: `hero/<Block>.props.schema.json`, an `anyOf` of
//!   `{variant, props}` wrappers that also describe block-level props
//!
//! The two document shapes differ on purpose; consumers depend on both.

mod aggregate;
mod content;
mod examples;
mod hero;
mod shape;

use std::path::{Path, PathBuf};

use serde_json::Value;

pub use aggregate::{BlockAggregate, VariantAggregate};
pub use content::ContentSchemaGenerator;
pub use hero::HeroSchemaGenerator;
pub use shape::{InferredSchema, Primitive, infer_schema, merge};

use crate::error::SchemaError;

/// JSON Schema dialect stamped on every generated document.
pub const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// One generated schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSchema {
    pub block: String,
    /// Path relative to the generator's output directory.
    pub relative_path: PathBuf,
    pub document: Value,
}

impl GeneratedSchema {
    /// Write the document as pretty JSON under `output_dir`, creating parents.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Io` if a directory or the file cannot be written.
    pub fn write(&self, output_dir: &Path) -> Result<PathBuf, SchemaError> {
        let path = output_dir.join(&self.relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SchemaError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let mut rendered = serde_json::to_string_pretty(&self.document)
            .map_err(|e| SchemaError::Generation(e.to_string()))?;
        rendered.push('\n');
        std::fs::write(&path, rendered).map_err(|source| SchemaError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Write every document, returning the written paths in order.
///
/// # Errors
///
/// Stops at the first write failure.
pub fn write_all(schemas: &[GeneratedSchema], output_dir: &Path) -> Result<Vec<PathBuf>, SchemaError> {
    schemas.iter().map(|s| s.write(output_dir)).collect()
}
