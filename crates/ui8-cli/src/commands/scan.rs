use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::info;
use ui8_config::Ui8Config;
use ui8_registry::{ScanOptions, scan_project};

use crate::bootstrap::load_config;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScanArgs;
use crate::commands::project_path;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct ScanResponse {
    manifest: PathBuf,
    items: usize,
}

/// Handle `ui8kit scan`.
pub fn handle(args: &ScanArgs, project_root: &Path, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = load_config(project_root)?;
    let progress = Progress::spinner("Scanning components");
    let response = run(args, &config, project_root)?;
    progress.finish_ok(&format!("Found {} components", response.items));
    info!(
        items = response.items,
        manifest = %response.manifest.display(),
        "scan complete"
    );
    output(&response, flags.format)
}

fn run(args: &ScanArgs, config: &Ui8Config, project_root: &Path) -> anyhow::Result<ScanResponse> {
    let options = ScanOptions::from_config(config, project_root, args.source.as_deref());
    let registry = scan_project(&options);

    let manifest = args.output.as_ref().map_or_else(
        || project_path(project_root, &config.scan.output),
        |path| project_path(project_root, path),
    );
    if let Some(parent) = manifest.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut rendered = serde_json::to_string_pretty(&registry)?;
    rendered.push('\n');
    std::fs::write(&manifest, rendered)
        .with_context(|| format!("failed to write {}", manifest.display()))?;

    Ok(ScanResponse {
        manifest,
        items: registry.items.len(),
    })
}
