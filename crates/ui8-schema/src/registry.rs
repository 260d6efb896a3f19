//! Central schema registry for the ui8kit manifest types.
//!
//! The `SchemaRegistry` builds JSON Schemas from ui8-core and ui8-config types
//! at construction time using [`schemars::schema_for!`] and provides
//! validation via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Name of the source manifest schema (`registry.json`).
pub const REGISTRY: &str = "registry";
/// Name of the published item schema (`r/<folder>/<name>.json`).
pub const REGISTRY_ITEM: &str = "registry-item";
/// Name of the project config schema (`ui8kit.config.json`).
pub const CONFIG: &str = "config";
/// Name of the published index schema (`r/index.json`).
pub const INDEX: &str = "index";

/// Central store of all JSON Schemas used by the toolchain.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a new registry containing the manifest, item, index and config
    /// schemas.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on any `schemars`-generated
    /// schema. This is not expected in practice because `schemars` always
    /// produces valid JSON-serialisable output.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        register!(schemas, REGISTRY, ui8_core::Registry);
        register!(schemas, REGISTRY_ITEM, ui8_core::PublishedItem);
        register!(schemas, INDEX, ui8_core::RegistryIndex);
        register!(schemas, CONFIG, ui8_config::Ui8Config);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
