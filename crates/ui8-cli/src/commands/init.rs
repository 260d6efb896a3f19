use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::info;
use ui8_config::Ui8Config;
use ui8_core::ComponentKind;

use crate::bootstrap::load_config;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::commands::project_path;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitResponse {
    config_path: PathBuf,
    /// False when an existing config was kept.
    created: bool,
    registry: String,
    directories: Vec<PathBuf>,
}

/// Handle `ui8kit init`.
pub fn handle(args: &InitArgs, project_root: &Path, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = run(args, project_root)?;
    info!(
        config = %response.config_path.display(),
        created = response.created,
        "initialized project"
    );
    output(&response, flags.format)
}

fn run(args: &InitArgs, project_root: &Path) -> anyhow::Result<InitResponse> {
    let config_path = Ui8Config::project_config_path(project_root);
    let keep_existing = config_path.exists() && !args.yes;

    let config = if keep_existing {
        load_config(project_root)?
    } else {
        let mut config = Ui8Config::default();
        config.registry.name.clone_from(&args.registry);
        config.validate().context("invalid registry name")?;
        config
            .write(project_root)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        config
    };

    let source_root = project_path(project_root, &config.scan.source_dir);
    let directories = ComponentKind::ALL
        .iter()
        .map(|kind| source_root.join(kind.folder()))
        .collect::<Vec<_>>();
    for dir in &directories {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    Ok(InitResponse {
        config_path,
        created: !keep_existing,
        registry: config.registry.name,
        directories,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(yes: bool, registry: &str) -> InitArgs {
        InitArgs {
            yes,
            registry: registry.to_string(),
        }
    }

    #[test]
    fn writes_config_and_component_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let response = run(&args(false, "ui"), tmp.path()).unwrap();

        assert!(response.created);
        assert!(tmp.path().join("ui8kit.config.json").is_file());
        for kind in ComponentKind::ALL {
            assert!(tmp.path().join("src").join(kind.folder()).is_dir());
        }
    }

    #[test]
    fn existing_config_is_kept_without_yes() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("ui8kit.config.json");
        std::fs::write(&path, r#"{ "registry": { "name": "custom" } }"#).unwrap();

        let response = run(&args(false, "ui"), tmp.path()).unwrap();
        assert!(!response.created);
        assert_eq!(response.registry, "custom");
        assert!(std::fs::read_to_string(&path).unwrap().contains("custom"));

        let response = run(&args(true, "ui"), tmp.path()).unwrap();
        assert!(response.created);
        assert_eq!(response.registry, "ui");
    }
}
