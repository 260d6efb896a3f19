use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `ui8kit` binary.
#[derive(Debug, Parser)]
#[command(name = "ui8kit", version, about = "ui8kit - component registry toolchain")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no progress)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    pub cwd: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            cwd: self.cwd.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["ui8kit", "--format", "raw", "--verbose", "scan"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Scan(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["ui8kit", "build", "--quiet", "--cwd", "/tmp/demo"])
            .expect("cli should parse");

        assert!(cli.quiet);
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.cwd.as_deref(), Some("/tmp/demo"));
        assert_eq!(flags.format, OutputFormat::Json);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["ui8kit", "--format", "table", "scan"]).is_err());
    }

    #[test]
    fn add_collects_components_and_flags() {
        let cli = Cli::try_parse_from([
            "ui8kit", "add", "button", "card", "--force", "--dry-run", "--retry",
        ])
        .expect("cli should parse");
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.components, vec!["button", "card"]);
        assert!(args.force && args.dry_run && args.retry);
        assert!(!args.all);
    }

    #[test]
    fn add_all_conflicts_with_names() {
        assert!(Cli::try_parse_from(["ui8kit", "add", "--all", "button"]).is_err());
        assert!(Cli::try_parse_from(["ui8kit", "add", "--all"]).is_ok());
    }

    #[test]
    fn build_takes_optional_manifest_and_output() {
        let cli = Cli::try_parse_from(["ui8kit", "build", "reg.json", "--output", "dist/r"])
            .expect("cli should parse");
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.registry_path.as_deref(), Some(std::path::Path::new("reg.json")));
        assert_eq!(args.output.as_deref(), Some(std::path::Path::new("dist/r")));
    }

    #[test]
    fn schemas_accepts_repeated_categories() {
        let cli = Cli::try_parse_from([
            "ui8kit", "schemas", "--category", "hero", "--category", "cards", "--hero",
        ])
        .expect("cli should parse");
        let Commands::Schemas(args) = cli.command else {
            panic!("expected schemas");
        };
        assert_eq!(args.categories, vec!["hero", "cards"]);
        assert!(args.hero);
    }

    #[test]
    fn init_defaults_to_ui_registry() {
        let cli = Cli::try_parse_from(["ui8kit", "init"]).expect("cli should parse");
        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.registry, "ui");
        assert!(!args.yes);
    }
}
