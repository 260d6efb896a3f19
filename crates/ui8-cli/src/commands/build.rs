use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};
use ui8_registry::{BuildOptions, build_registry};

use crate::bootstrap::load_config;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::BuildArgs;
use crate::output::output;
use crate::progress::Progress;

/// Handle `ui8kit build`.
pub fn handle(args: &BuildArgs, project_root: &Path, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = load_config(project_root)?;
    let mut options = BuildOptions::from_config(&config, project_root);
    if let Some(manifest) = &args.registry_path {
        options.manifest.clone_from(manifest);
    }
    if let Some(dir) = &args.output {
        options.output_dir.clone_from(dir);
    }

    let progress = Progress::spinner("Building registry");
    let report = match build_registry(&options) {
        Ok(report) => report,
        Err(error) => {
            progress.finish_err("Build failed");
            return Err(error).with_context(|| {
                format!("failed to build registry from {}", options.manifest.display())
            });
        }
    };
    progress.finish_ok(&format!("Built {} items", report.items));

    for warning in &report.warnings {
        warn!("{warning}");
    }
    info!(
        items = report.items,
        files = report.written.len(),
        output = %report.output_dir.display(),
        "registry built"
    );
    output(&report, flags.format)
}
