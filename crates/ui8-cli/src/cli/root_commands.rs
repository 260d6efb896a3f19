use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Write ui8kit.config.json and create the component directories.
    Init(InitArgs),
    /// Install components from the configured registry.
    Add(AddArgs),
    /// Build the publishable registry from a manifest.
    Build(BuildArgs),
    /// Scan component directories into a registry manifest.
    Scan(ScanArgs),
    /// Infer JSON Schemas from example usage files.
    Schemas(SchemasArgs),
}

/// Arguments for `ui8kit init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config without asking.
    #[arg(short, long)]
    pub yes: bool,
    /// Registry name to initialize.
    #[arg(long, default_value = "ui")]
    pub registry: String,
}

/// Arguments for `ui8kit add`.
#[derive(Clone, Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct AddArgs {
    /// Component names to install.
    pub components: Vec<String>,
    /// Overwrite files that already exist.
    #[arg(long)]
    pub force: bool,
    /// Show what would be installed without writing anything.
    #[arg(long)]
    pub dry_run: bool,
    /// Install every component in the registry index.
    #[arg(long, conflicts_with = "components")]
    pub all: bool,
    /// Retry transient network failures.
    #[arg(long)]
    pub retry: bool,
}

/// Arguments for `ui8kit build`.
#[derive(Clone, Debug, Args)]
pub struct BuildArgs {
    /// Manifest to build (defaults to build.manifest).
    pub registry_path: Option<PathBuf>,
    /// Output directory (defaults to build.output_dir).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `ui8kit scan`.
#[derive(Clone, Debug, Args)]
pub struct ScanArgs {
    /// Manifest path to write (defaults to scan.output).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Source root containing ui/, components/, blocks/, templates/, lib/.
    #[arg(short, long)]
    pub source: Option<PathBuf>,
}

/// Arguments for `ui8kit schemas`.
#[derive(Clone, Debug, Args)]
pub struct SchemasArgs {
    /// Examples root (defaults to schemas.examples_dir).
    #[arg(long)]
    pub examples: Option<PathBuf>,
    /// Output directory (defaults to schemas.output_dir).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Categories to process; repeatable. Defaults to every subdirectory.
    #[arg(long = "category")]
    pub categories: Vec<String>,
    /// Generate hero props schemas instead of generic content schemas.
    #[arg(long)]
    pub hero: bool,
}
