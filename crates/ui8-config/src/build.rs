//! Registry build configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_manifest() -> String {
    "./src/registry.json".to_string()
}

fn default_output_dir() -> String {
    "./packages/registry/r".to_string()
}

fn default_core_classes() -> String {
    "./src/lib/core-classes.json".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct BuildConfig {
    /// Registry manifest read by `build`.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Output directory for item documents and `index.json`.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Optional sidecar copied into `<output_dir>/lib/` when present.
    #[serde(default = "default_core_classes")]
    pub core_classes: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            output_dir: default_output_dir(),
            core_classes: default_core_classes(),
        }
    }
}
