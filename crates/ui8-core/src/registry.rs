//! Registry manifest types.
//!
//! A `Registry` has two lifecycles. The scanner produces one with items that
//! carry no file contents and writes it as an input manifest. The build reads
//! it back, inlines every file, and explodes it into per-item documents plus an
//! `index.json` (`RegistryIndex`); the manifest itself is never rewritten.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::kind::ComponentKind;

/// `$schema` URL stamped on scan-produced registries.
pub const REGISTRY_SCHEMA_URL: &str = "https://ui8kit.com/schema/registry.json";

/// `$schema` URL stamped on every built item document.
pub const REGISTRY_ITEM_SCHEMA_URL: &str = "https://ui8kit.com/schema/registry-item.json";

/// `$schema` URL stamped on the built `index.json`.
pub const INDEX_SCHEMA_URL: &str = "https://ui8kit.com/schema/index.json";

/// A single file belonging to a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComponentFile {
    /// Path relative to the project working directory, forward slashes.
    pub path: String,
    /// Full file text. Only populated by the build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Install-time directory hint (`ui`, `blocks`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl ComponentFile {
    #[must_use]
    pub fn new(path: impl Into<String>, target: Option<String>) -> Self {
        Self {
            path: path.into(),
            content: None,
            target,
        }
    }
}

/// A component entry in a registry manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Reserved; the scanner always leaves it empty.
    #[serde(default)]
    pub dev_dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registry_dependencies: Vec<String>,
    pub files: Vec<ComponentFile>,
}

impl RegistryItem {
    /// A freshly scanned item: one file, no dependencies yet.
    #[must_use]
    pub fn scanned(
        name: impl Into<String>,
        kind: ComponentKind,
        description: Option<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            schema: None,
            name: name.into(),
            kind,
            title: None,
            description,
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            registry_dependencies: Vec::new(),
            files: vec![ComponentFile::new(path, Some(kind.folder().to_string()))],
        }
    }
}

/// A registry manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Registry {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub items: Vec<RegistryItem>,
}

/// A file inside a published item document; `content` is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PublishedFile {
    pub path: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Shape of a built `<folder>/<name>.json` document.
///
/// Only used to derive the strict per-item schema the build re-validates
/// against: at least one file, every file with its content inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishedItem {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[schemars(length(min = 1))]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub dev_dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registry_dependencies: Vec<String>,
    #[schemars(length(min = 1))]
    pub files: Vec<PublishedFile>,
}

impl PublishedItem {
    /// Display title, falling back to the item name.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Thin projection written into `index.json`.
    #[must_use]
    pub fn index_entry(&self) -> IndexEntry {
        IndexEntry {
            name: self.name.clone(),
            kind: self.kind,
            title: self.display_title().to_string(),
            description: self.description.clone(),
        }
    }
}

/// One row of `index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IndexEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The aggregate `index.json` written after every item document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistryIndex {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    pub version: String,
    pub last_updated: String,
    pub categories: Vec<String>,
    pub components: Vec<IndexEntry>,
}

impl RegistryIndex {
    /// Look up a component by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&IndexEntry> {
        self.components.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scanned_item_has_target_hint_and_no_content() {
        let item = RegistryItem::scanned("Hero", ComponentKind::Block, None, "src/blocks/Hero.tsx");
        assert_eq!(item.files.len(), 1);
        assert_eq!(item.files[0].target.as_deref(), Some("blocks"));
        assert!(item.files[0].content.is_none());
        assert!(item.dependencies.is_empty());
        assert!(item.dev_dependencies.is_empty());
    }

    #[test]
    fn scanned_item_serializes_manifest_shape() {
        let item = RegistryItem::scanned(
            "Button",
            ComponentKind::Ui,
            Some("A button".into()),
            "src/ui/Button.tsx",
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Button",
                "type": "registry:ui",
                "description": "A button",
                "dependencies": [],
                "devDependencies": [],
                "files": [{ "path": "src/ui/Button.tsx", "target": "ui" }]
            })
        );
    }

    #[test]
    fn manifest_tolerates_missing_optional_fields() {
        let registry: Registry = serde_json::from_value(serde_json::json!({
            "items": [{
                "name": "cn",
                "type": "registry:lib",
                "files": [{ "path": "src/lib/utils.ts" }]
            }]
        }))
        .unwrap();
        assert_eq!(registry.items[0].kind, ComponentKind::Lib);
        assert!(registry.items[0].dependencies.is_empty());
    }

    #[test]
    fn index_entry_falls_back_to_name_for_title() {
        let mut item = PublishedItem {
            schema: REGISTRY_ITEM_SCHEMA_URL.into(),
            name: "Card".into(),
            kind: ComponentKind::Ui,
            title: None,
            description: Some("Surface".into()),
            dependencies: vec![],
            dev_dependencies: vec![],
            registry_dependencies: vec![],
            files: vec![PublishedFile {
                path: "src/ui/Card.tsx".into(),
                content: String::new(),
                target: None,
            }],
        };
        let entry = item.index_entry();
        assert_eq!(entry.title, "Card");
        assert_eq!(entry.kind, ComponentKind::Ui);
        assert_eq!(entry.description.as_deref(), Some("Surface"));

        item.title = Some("Card surface".into());
        assert_eq!(item.index_entry().title, "Card surface");
    }
}
