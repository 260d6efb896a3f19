//! Build pipeline: manifest on disk to the published registry tree.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use ui8_registry::{BuildError, BuildOptions, build_registry};

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn options(root: &Path) -> BuildOptions {
    BuildOptions {
        manifest: PathBuf::from("src/registry.json"),
        cwd: root.to_path_buf(),
        output_dir: PathBuf::from("packages/registry/r"),
        core_classes: Some(PathBuf::from("src/lib/core-classes.json")),
    }
}

fn manifest(items: &Value) -> String {
    serde_json::to_string_pretty(&json!({
        "$schema": "https://ui8kit.com/schema/registry.json",
        "registry": "ui",
        "version": "1.0.0",
        "items": items,
    }))
    .unwrap()
}

#[test]
fn builds_items_index_and_schemas() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "src/ui/Button.tsx", "export const Button = () => null;\n");
    write(root, "src/blocks/Hero.tsx", "export const Hero = () => null;\n");
    write(root, "src/lib/core-classes.json", "[\"flex\"]\n");
    write(
        root,
        "src/registry.json",
        &manifest(&json!([
            {
                "name": "Button",
                "type": "registry:ui",
                "dependencies": ["react"],
                "devDependencies": [],
                "files": [{ "path": "src/ui/Button.tsx", "target": "ui" }]
            },
            {
                "name": "Hero",
                "type": "registry:block",
                "description": "Landing hero",
                "dependencies": [],
                "devDependencies": [],
                "files": [{ "path": "src/blocks/Hero.tsx", "target": "blocks" }]
            }
        ])),
    );

    let report = build_registry(&options(root)).unwrap();
    let out = root.join("packages/registry/r");
    assert_eq!(report.items, 2);
    assert!(report.warnings.is_empty());

    let button = read_json(&out.join("ui/Button.json"));
    assert_eq!(
        button["$schema"],
        json!("https://ui8kit.com/schema/registry-item.json")
    );
    assert_eq!(
        button["files"][0]["content"],
        json!("export const Button = () => null;\n")
    );

    let index = read_json(&out.join("index.json"));
    assert_eq!(index["categories"], json!(["ui", "blocks"]));
    assert_eq!(index["components"][1]["description"], json!("Landing hero"));
    assert_eq!(index["components"][1]["title"], json!("Hero"));
    assert!(index["lastUpdated"].is_string());

    assert!(root.join("packages/registry/schema.json").is_file());
    assert!(root.join("packages/registry/schema/registry.json").is_file());
    assert!(root.join("packages/registry/schema/registry-item.json").is_file());
    assert!(root.join("packages/registry/schema/index.json").is_file());
    assert_eq!(index["$schema"], json!("https://ui8kit.com/schema/index.json"));
    assert!(out.join("lib/core-classes.json").is_file());

    let index_pos = report
        .written
        .iter()
        .position(|p| p.ends_with("index.json"))
        .unwrap();
    let button_pos = report
        .written
        .iter()
        .position(|p| p.ends_with("ui/Button.json"))
        .unwrap();
    assert!(button_pos < index_pos);
}

#[test]
fn missing_source_file_aborts_without_output() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "src/ui/Button.tsx", "export const Button = () => null;\n");
    write(
        root,
        "src/registry.json",
        &manifest(&json!([
            {
                "name": "Button",
                "type": "registry:ui",
                "files": [{ "path": "src/ui/Button.tsx" }]
            },
            {
                "name": "Ghost",
                "type": "registry:ui",
                "files": [{ "path": "missing.tsx" }]
            }
        ])),
    );

    let err = build_registry(&options(root)).unwrap_err();
    match err {
        BuildError::MissingFile { item, path } => {
            assert_eq!(item, "Ghost");
            assert!(path.ends_with("missing.tsx"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!root.join("packages").exists());
}

#[test]
fn item_without_files_fails_strict_validation() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(
        root,
        "src/registry.json",
        &manifest(&json!([{ "name": "Empty", "type": "registry:lib", "files": [] }])),
    );
    let err = build_registry(&options(root)).unwrap_err();
    assert!(matches!(err, BuildError::ItemInvalid { ref item, .. } if item == "Empty"));
    assert!(!root.join("packages").exists());
}

#[test]
fn manifest_errors_are_distinguished() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    assert!(matches!(
        build_registry(&options(root)).unwrap_err(),
        BuildError::ManifestNotFound(_)
    ));

    write(root, "src/registry.json", "{ not json");
    assert!(matches!(
        build_registry(&options(root)).unwrap_err(),
        BuildError::ManifestParse { .. }
    ));

    write(root, "src/registry.json", r#"{ "items": [{ "name": "x" }] }"#);
    assert!(matches!(
        build_registry(&options(root)).unwrap_err(),
        BuildError::ManifestInvalid { .. }
    ));
    assert!(!root.join("packages").exists());
}

#[test]
fn scan_output_builds_cleanly() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(
        root,
        "src/ui/Badge.tsx",
        "import { cva } from 'class-variance-authority';\nexport const Badge = () => null;\n",
    );
    let config = ui8_config::Ui8Config::default();
    let registry =
        ui8_registry::scan_project(&ui8_registry::ScanOptions::from_config(&config, root, None));
    write(
        root,
        "src/registry.json",
        &serde_json::to_string_pretty(&registry).unwrap(),
    );

    let report = build_registry(&options(root)).unwrap();
    assert_eq!(report.items, 1);
    let badge = read_json(&root.join("packages/registry/r/ui/Badge.json"));
    assert_eq!(badge["dependencies"], json!(["class-variance-authority"]));
}

#[test]
fn item_name_cannot_escape_output_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "src/ui/Button.tsx", "export const Button = () => null;\n");
    write(
        root,
        "src/registry.json",
        &manifest(&json!([{
            "name": "../../../../escaped",
            "type": "registry:ui",
            "files": [{ "path": "src/ui/Button.tsx" }]
        }])),
    );

    let err = build_registry(&options(root)).unwrap_err();
    assert!(
        matches!(err, BuildError::ItemInvalid { ref item, .. } if item == "../../../../escaped")
    );
    assert!(!root.join("packages").exists());
    assert!(!root.join("escaped.json").exists());
}

#[test]
fn failed_sidecar_copy_is_a_warning() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "src/ui/Button.tsx", "export const Button = () => null;\n");
    write(root, "src/lib/core-classes.json", "[\"flex\"]\n");
    // A plain file where the `lib` output directory would go.
    write(root, "packages/registry/r/lib", "not a directory");
    write(
        root,
        "src/registry.json",
        &manifest(&json!([{
            "name": "Button",
            "type": "registry:ui",
            "files": [{ "path": "src/ui/Button.tsx" }]
        }])),
    );

    let report = build_registry(&options(root)).unwrap();
    assert_eq!(report.items, 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("core-classes.json"));
    assert!(root.join("packages/registry/r/index.json").is_file());
    assert!(!report.written.iter().any(|p| p.ends_with("lib/core-classes.json")));
}
