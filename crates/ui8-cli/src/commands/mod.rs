use std::path::{Path, PathBuf};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;

pub mod add;
pub mod build;
pub mod init;
pub mod scan;
pub mod schemas;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    project_root: &Path,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Init(args) => init::handle(&args, project_root, flags),
        Commands::Add(args) => add::handle(&args, project_root, flags).await,
        Commands::Build(args) => build::handle(&args, project_root, flags),
        Commands::Scan(args) => scan::handle(&args, project_root, flags),
        Commands::Schemas(args) => schemas::handle(&args, project_root, flags),
    }
}

/// Resolve a config or argument path against the project root.
pub(crate) fn project_path(project_root: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
