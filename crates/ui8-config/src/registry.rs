//! Registry identity and install source.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_name() -> String {
    "ui".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct RegistryConfig {
    /// Registry name stamped on scanned manifests and `index.json`.
    #[serde(default = "default_name")]
    pub name: String,

    /// Registry version stamped on scanned manifests and `index.json`.
    #[serde(default = "default_version")]
    pub version: String,

    /// Base URL of a published registry (`https://.../r`). When empty, `add`
    /// installs from the local build output directory.
    #[serde(default)]
    pub url: String,
}

impl RegistryConfig {
    /// Whether `ui8kit add` fetches over HTTP. A blank URL means the local
    /// build output directory.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            url: String::new(),
        }
    }
}
