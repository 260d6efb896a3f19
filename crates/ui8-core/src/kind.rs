//! Component kinds and their fixed folder map.
//!
//! Manifests spell kinds with a `registry:` prefix (`registry:ui`,
//! `registry:block`, ...). The folder map decides both the build output
//! subdirectory and the install-time `target` hint written by the scanner.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// The declared kind of a registry component.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum ComponentKind {
    #[serde(rename = "registry:ui")]
    Ui,
    #[serde(rename = "registry:component")]
    Component,
    #[serde(rename = "registry:block")]
    Block,
    #[serde(rename = "registry:template")]
    Template,
    #[serde(rename = "registry:lib")]
    Lib,
}

impl ComponentKind {
    /// Every kind, in the order a project scan visits them.
    pub const ALL: [Self; 5] = [
        Self::Ui,
        Self::Component,
        Self::Block,
        Self::Template,
        Self::Lib,
    ];

    /// Bare kind name (`ui`, `block`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ui => "ui",
            Self::Component => "component",
            Self::Block => "block",
            Self::Template => "template",
            Self::Lib => "lib",
        }
    }

    /// Manifest spelling (`registry:ui`, `registry:block`, ...).
    #[must_use]
    pub const fn registry_type(self) -> &'static str {
        match self {
            Self::Ui => "registry:ui",
            Self::Component => "registry:component",
            Self::Block => "registry:block",
            Self::Template => "registry:template",
            Self::Lib => "registry:lib",
        }
    }

    /// Output folder under the build directory, also used as the install target.
    #[must_use]
    pub const fn folder(self) -> &'static str {
        match self {
            Self::Ui => "ui",
            Self::Component => "components",
            Self::Block => "blocks",
            Self::Template => "templates",
            Self::Lib => "lib",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = CoreError;

    /// Accepts the bare name, the manifest spelling, or the folder name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.strip_prefix("registry:").unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == bare || k.folder() == bare)
            .ok_or_else(|| CoreError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_map_is_fixed() {
        assert_eq!(ComponentKind::Ui.folder(), "ui");
        assert_eq!(ComponentKind::Block.folder(), "blocks");
        assert_eq!(ComponentKind::Component.folder(), "components");
        assert_eq!(ComponentKind::Template.folder(), "templates");
        assert_eq!(ComponentKind::Lib.folder(), "lib");
    }

    #[test]
    fn serializes_with_registry_prefix() {
        let json = serde_json::to_string(&ComponentKind::Block).unwrap();
        assert_eq!(json, "\"registry:block\"");
        let back: ComponentKind = serde_json::from_str("\"registry:lib\"").unwrap();
        assert_eq!(back, ComponentKind::Lib);
    }

    #[test]
    fn parses_every_spelling() {
        assert_eq!("ui".parse::<ComponentKind>().unwrap(), ComponentKind::Ui);
        assert_eq!(
            "registry:template".parse::<ComponentKind>().unwrap(),
            ComponentKind::Template
        );
        assert_eq!(
            "blocks".parse::<ComponentKind>().unwrap(),
            ComponentKind::Block
        );
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "widget".parse::<ComponentKind>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown component kind: widget");
    }

    #[test]
    fn registry_type_matches_serde() {
        for kind in ComponentKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json.as_str(), Some(kind.registry_type()));
        }
    }
}
