//! Integration tests for project-level JSON configuration loading.
//!
//! Uses figment::Jail for sandboxed working directories and env vars.

use std::path::Path;

use figment::{
    Figment, Jail,
    providers::{Format, Json, Serialized},
};
use ui8_config::{CONFIG_FILE_NAME, Ui8Config};

#[test]
fn loads_sections_from_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            CONFIG_FILE_NAME,
            r#"{
                "registry": { "name": "blocks", "url": "https://registry.example.com/r" },
                "scan": { "source_dir": "./app", "workspace_prefixes": ["@acme/"] },
                "build": { "output_dir": "./public/r" },
                "schemas": { "categories": ["hero", "features"] }
            }"#,
        )?;

        let config = Ui8Config::load(Path::new(".")).expect("config loads");

        assert_eq!(config.registry.name, "blocks");
        assert!(config.registry.is_remote());
        assert_eq!(config.scan.source_dir, "./app");
        assert_eq!(config.scan.workspace_prefixes, vec!["@acme/".to_string()]);
        assert_eq!(config.build.output_dir, "./public/r");
        assert_eq!(config.schemas.categories, vec!["hero", "features"]);
        Ok(())
    });
}

#[test]
fn partial_file_keeps_defaults_for_missing_fields() {
    Jail::expect_with(|jail| {
        jail.create_file(CONFIG_FILE_NAME, r#"{ "scan": { "output": "./registry.json" } }"#)?;

        let config: Ui8Config = Figment::from(Serialized::defaults(Ui8Config::default()))
            .merge(Json::file(CONFIG_FILE_NAME))
            .extract()?;

        assert_eq!(config.scan.output, "./registry.json");
        assert_eq!(config.scan.source_dir, "./src");
        assert_eq!(config.build.manifest, "./src/registry.json");
        assert_eq!(config.registry.version, "1.0.0");
        Ok(())
    });
}

#[test]
fn missing_project_file_yields_defaults() {
    Jail::expect_with(|_jail| {
        let config = Ui8Config::load(Path::new(".")).expect("config loads");
        assert_eq!(config.build.core_classes, "./src/lib/core-classes.json");
        assert_eq!(config.schemas.examples_dir, "./src/examples");
        Ok(())
    });
}

#[test]
fn malformed_json_is_a_config_error() {
    Jail::expect_with(|jail| {
        jail.create_file(CONFIG_FILE_NAME, "{ not json")?;
        assert!(Ui8Config::load(Path::new(".")).is_err());
        Ok(())
    });
}
