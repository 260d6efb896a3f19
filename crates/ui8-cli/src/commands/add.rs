use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Serialize;
use tracing::{info, warn};
use ui8_config::Ui8Config;
use ui8_core::{IndexEntry, RegistryIndex};
use ui8_parser::is_external_dependency;
use ui8_registry::{
    FileAction, PlannedFile, RETRY_ATTEMPTS, RegistrySource, SourceError, apply_install,
    plan_install, with_retry,
};

use crate::bootstrap::load_config;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::AddArgs;
use crate::commands::project_path;
use crate::output::output;
use crate::package_manager::PackageManager;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct AddResponse {
    source: String,
    dry_run: bool,
    components: Vec<String>,
    files: Vec<PlannedFile>,
    written: usize,
    dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    package_manager: Option<PackageManager>,
}

/// Handle `ui8kit add`.
pub async fn handle(args: &AddArgs, project_root: &Path, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.components.is_empty() && !args.all {
        bail!("no components given; pass component names or --all");
    }
    let config = load_config(project_root)?;
    let source = RegistrySource::from_config(
        &config.registry,
        &project_path(project_root, &config.build.output_dir),
    )
    .map_err(report_source_error)?;
    let attempts = if args.retry { RETRY_ATTEMPTS } else { 0 };

    let progress = Progress::spinner(&format!("Reading registry from {}", source.describe()));
    let index = with_retry(attempts, || source.fetch_index())
        .await
        .map_err(|e| {
            progress.finish_err("Registry unavailable");
            report_source_error(e)
        })?;

    let entries = select_entries(&index, args)?;
    let plan = plan(&source, &entries, &config, project_root, args, attempts, &progress).await?;
    progress.finish_ok(&format!("Resolved {} components", entries.len()));

    let mut response = AddResponse {
        source: source.describe(),
        dry_run: args.dry_run,
        components: entries.iter().map(|e| e.name.clone()).collect(),
        files: plan.files,
        written: 0,
        dependencies: plan.dependencies,
        package_manager: None,
    };

    if !args.dry_run {
        response.written = apply_install(&response.files).context("failed to write component files")?;
        if !response.dependencies.is_empty() {
            let manager = PackageManager::detect(project_root);
            manager.install(project_root, &response.dependencies).await?;
            response.package_manager = Some(manager);
        }
        let skipped = response
            .files
            .iter()
            .filter(|f| f.action == FileAction::Skip)
            .count();
        info!(
            components = response.components.len(),
            written = response.written,
            skipped,
            "components added"
        );
    }

    output(&response, flags.format)
}

/// Index entries to install, in the order requested.
fn select_entries(index: &RegistryIndex, args: &AddArgs) -> anyhow::Result<Vec<IndexEntry>> {
    if args.all {
        return Ok(index.components.clone());
    }
    let mut entries = Vec::with_capacity(args.components.len());
    let mut missing = Vec::new();
    for name in &args.components {
        match index.find(name) {
            Some(entry) => entries.push(entry.clone()),
            None => missing.push(name.as_str()),
        }
    }
    if !missing.is_empty() {
        let err = SourceError::NotFound(missing.join(", "));
        return Err(report_source_error(err));
    }
    Ok(entries)
}

struct InstallPlan {
    files: Vec<PlannedFile>,
    dependencies: Vec<String>,
}

async fn plan(
    source: &RegistrySource,
    entries: &[IndexEntry],
    config: &Ui8Config,
    project_root: &Path,
    args: &AddArgs,
    attempts: u32,
    progress: &Progress,
) -> anyhow::Result<InstallPlan> {
    let source_dir: PathBuf = project_path(project_root, &config.scan.source_dir);
    let mut files = Vec::new();
    let mut dependencies = BTreeSet::new();

    for entry in entries {
        progress.set_message(&format!("Fetching {}", entry.name));
        let item = with_retry(attempts, || source.fetch_item(entry))
            .await
            .map_err(|e| {
                progress.finish_err(&format!("Failed to fetch {}", entry.name));
                report_source_error(e)
            })?;
        dependencies.extend(installable_dependencies(
            &item.dependencies,
            &config.scan.workspace_prefixes,
        ));
        files.extend(plan_install(&item, &source_dir, args.force).map_err(report_source_error)?);
    }

    Ok(InstallPlan {
        files,
        dependencies: dependencies.into_iter().collect(),
    })
}

/// Registry-declared packages that are safe to hand to the package manager.
///
/// Workspace packages, protocols such as `file:`, and anything that is not a
/// bare package name (including `--flags`) are dropped.
fn installable_dependencies<'a>(
    declared: &'a [String],
    workspace_prefixes: &'a [String],
) -> impl Iterator<Item = String> + 'a {
    declared.iter().filter_map(move |name| {
        if !name.starts_with('-') && is_external_dependency(name, workspace_prefixes) {
            Some(name.clone())
        } else {
            warn!(dependency = %name, "ignoring non-installable dependency");
            None
        }
    })
}

/// Print recovery hints to stderr and convert to an `anyhow` error.
fn report_source_error(error: SourceError) -> anyhow::Error {
    for hint in error.suggestions() {
        eprintln!("  hint: {hint}");
    }
    anyhow::Error::new(error).context("failed to read registry")
}
