use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rsc",
    about = "Risk scorecards: schema migration and structural comparison",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upgrade a scorecard to a newer schema version
    Migrate(MigrateArgs),
    /// Compare an updated scorecard against an older one
    Compare(CompareArgs),
    /// Path-by-path diff of two raw documents
    Diff(DiffArgs),
}

/// Inputs shared by the commands that may run a migration.
#[derive(Args, Clone, Debug, Default)]
pub struct MigrationArgs {
    /// Publication time stamped on actions when lifting a record to 4.2
    #[arg(long)]
    pub last_published: Option<DateTime<Utc>>,
    /// TOML file with migration options
    #[arg(long)]
    pub options: Option<PathBuf>,
}

#[derive(Args)]
pub struct MigrateArgs {
    pub file: PathBuf,
    /// Target schema version, e.g. 4.1
    #[arg(long)]
    pub to: String,
    #[command(flatten)]
    pub migration: MigrationArgs,
}

#[derive(Args)]
pub struct CompareArgs {
    pub updated: PathBuf,
    pub old: PathBuf,
    #[command(flatten)]
    pub migration: MigrationArgs,
}

#[derive(Args)]
pub struct DiffArgs {
    pub base: PathBuf,
    pub head: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_migrate() {
        let cli = Cli::try_parse_from([
            "rsc",
            "migrate",
            "card.json",
            "--to",
            "4.2",
            "--last-published",
            "2024-04-02T09:15:00Z",
        ])
        .unwrap();
        let Command::Migrate(args) = cli.command else {
            panic!("expected migrate");
        };
        assert_eq!(args.to, "4.2");
        assert_eq!(args.file, PathBuf::from("card.json"));
        assert!(args.migration.last_published.is_some());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn format_is_global() {
        let cli =
            Cli::try_parse_from(["rsc", "diff", "a.yaml", "b.yaml", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Command::Diff(_)));
    }

    #[test]
    fn migrate_requires_target() {
        assert!(Cli::try_parse_from(["rsc", "migrate", "card.json"]).is_err());
    }
}
