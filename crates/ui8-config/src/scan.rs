//! Source scanning configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_source_dir() -> String {
    "./src".to_string()
}

fn default_output() -> String {
    "./src/registry.json".to_string()
}

fn default_workspace_prefixes() -> Vec<String> {
    vec!["@ui8kit/".to_string()]
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ScanConfig {
    /// Base source directory; each kind is scanned under `<source_dir>/<folder>`.
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    /// Where `scan` writes the registry manifest.
    #[serde(default = "default_output")]
    pub output: String,

    /// Import prefixes of workspace-internal packages, never listed as dependencies.
    #[serde(default = "default_workspace_prefixes")]
    pub workspace_prefixes: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output: default_output(),
            workspace_prefixes: default_workspace_prefixes(),
        }
    }
}
