use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::info;
use ui8_config::Ui8Config;
use ui8_schema::infer::write_all;
use ui8_schema::{ContentSchemaGenerator, HeroSchemaGenerator};

use crate::bootstrap::load_config;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemasArgs;
use crate::commands::project_path;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct SchemasResponse {
    generator: &'static str,
    examples: PathBuf,
    output: PathBuf,
    blocks: Vec<String>,
    written: Vec<PathBuf>,
}

/// Handle `ui8kit schemas`.
pub fn handle(args: &SchemasArgs, project_root: &Path, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = load_config(project_root)?;
    let progress = Progress::spinner("Inferring schemas");
    let response = run(args, &config, project_root)?;
    progress.finish_ok(&format!("Wrote {} schemas", response.written.len()));
    info!(
        generator = response.generator,
        schemas = response.written.len(),
        output = %response.output.display(),
        "schemas generated"
    );
    output(&response, flags.format)
}

fn run(
    args: &SchemasArgs,
    config: &Ui8Config,
    project_root: &Path,
) -> anyhow::Result<SchemasResponse> {
    let examples = project_path(
        project_root,
        args.examples
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.schemas.examples_dir)),
    );
    let output_dir = project_path(
        project_root,
        args.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.schemas.output_dir)),
    );

    let (generator, schemas) = if args.hero {
        ("hero", HeroSchemaGenerator::new(&examples).generate())
    } else {
        let categories = if args.categories.is_empty() {
            config.schemas.categories.clone()
        } else {
            args.categories.clone()
        };
        (
            "content",
            ContentSchemaGenerator::new(&examples, categories).generate(),
        )
    };

    let written = write_all(&schemas, &output_dir)
        .with_context(|| format!("failed to write schemas to {}", output_dir.display()))?;

    Ok(SchemasResponse {
        generator,
        examples,
        output: output_dir,
        blocks: schemas.into_iter().map(|s| s.block).collect(),
        written,
    })
}
