//! Content-schema inference configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_examples_dir() -> String {
    "./src/examples".to_string()
}

fn default_output_dir() -> String {
    "./schemas".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct SchemasConfig {
    /// Root holding one directory per block category of `*.examples.tsx` files.
    #[serde(default = "default_examples_dir")]
    pub examples_dir: String,

    /// Where generated `*.schema.json` files are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Categories to process. Empty means every subdirectory of `examples_dir`.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Default for SchemasConfig {
    fn default() -> Self {
        Self {
            examples_dir: default_examples_dir(),
            output_dir: default_output_dir(),
            categories: Vec::new(),
        }
    }
}
