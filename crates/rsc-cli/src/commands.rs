use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use rsc_diff::{compare, diff_flat, DocumentChange, FlatDiff, TrackedProperty, VersionedChange};
use rsc_migrate::{migrate, MigrationOptions, MigrationStatus};
use rsc_types::{Identified, RiskDocument};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Migrate(args) => cmd_migrate(args, &cli.format),
        Command::Compare(args) => cmd_compare(args, &cli.format),
        Command::Diff(args) => cmd_diff(args, &cli.format),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MigrateOutput<'a> {
    document: Value,
    migration_status: &'a MigrationStatus,
}

fn cmd_migrate(args: MigrateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let options = load_options(&args.migration)?;
    let document = read_document(&args.file)?;
    let source = document.version_label();

    let (migrated, status) = migrate(document, &args.to, &options)
        .with_context(|| format!("failed to migrate {}", args.file.display()))?;

    match format {
        OutputFormat::Json => {
            let output = MigrateOutput {
                document: migrated.to_value()?,
                migration_status: &status,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!(
                "{} Migrated {} from {} to {}",
                "✓".green().bold(),
                args.file.display().to_string().bold(),
                source.yellow(),
                args.to.yellow()
            );
            print_status(&status);
        }
    }
    Ok(())
}

fn cmd_compare(args: CompareArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let options = load_options(&args.migration)?;
    let updated = read_document(&args.updated)?;
    let old = read_document(&args.old)?;

    let result = compare(&updated, &old, &options).with_context(|| {
        format!(
            "failed to compare {} against {}",
            args.updated.display(),
            args.old.display()
        )
    })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_comparison(&result),
    }
    Ok(())
}

fn cmd_diff(args: DiffArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let base = read_text(&args.base)?;
    let head = read_text(&args.head)?;
    let diff = diff_flat(&base, &head)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Text => print_flat_diff(&diff),
    }
    Ok(())
}

/// Resolve migration options: the TOML file first, then command-line flags.
pub(crate) fn load_options(args: &MigrationArgs) -> anyhow::Result<MigrationOptions> {
    let mut options = match &args.options {
        Some(path) => parse_options(&read_text(path)?)
            .with_context(|| format!("invalid options file {}", path.display()))?,
        None => MigrationOptions::default(),
    };
    if let Some(at) = args.last_published {
        options = options.with_last_published(at);
    }
    Ok(options)
}

pub(crate) fn parse_options(text: &str) -> anyhow::Result<MigrationOptions> {
    Ok(toml::from_str(text)?)
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_document(path: &Path) -> anyhow::Result<RiskDocument> {
    let text = read_text(path)?;
    let document =
        RiskDocument::parse(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    debug!(
        path = %path.display(),
        version = %document.version_label(),
        scenarios = document.scenario_count(),
        "loaded document"
    );
    Ok(document)
}

fn print_status(status: &MigrationStatus) {
    if status.steps_applied().is_empty() {
        println!("  Already at target version.");
        return;
    }
    for step in status.steps_applied() {
        println!("  Step: {} → {}", step.from_version, step.to_version);
    }
    let changes = if status.migration_changes { "yes".yellow() } else { "no".green() };
    let approval = if status.migration_requires_new_approval {
        "required".red().bold()
    } else {
        "not required".green()
    };
    println!("  Content changed by migration: {changes}");
    println!("  New approval: {approval}");
}

fn print_comparison(result: &VersionedChange) {
    println!("Compared at schema {}", result.schema_version.to_string().yellow().bold());
    if !result.migration_status.steps_applied().is_empty() {
        println!("Old record was migrated:");
        print_status(&result.migration_status);
    }

    let lines = match &result.change {
        DocumentChange::V3X(change) => scenario_lines(&change.scenarios),
        DocumentChange::V4X(change) => scenario_lines(&change.scenarios),
    };
    if lines.is_empty() {
        println!("No scenario changes.");
        return;
    }
    println!(
        "Scenarios: {} added, {} changed, {} deleted",
        result.scenarios_added().to_string().green(),
        result.scenarios_changed().to_string().yellow(),
        result.scenarios_deleted().to_string().red()
    );
    for line in lines {
        println!("  {line}");
    }
}

fn scenario_lines<T, C>(scenarios: &[TrackedProperty<T, C>]) -> Vec<String>
where
    T: Identified,
    C: Identified,
{
    scenarios
        .iter()
        .filter_map(|scenario| match scenario {
            TrackedProperty::Added { new_value } => {
                Some(format!("{} {}", "+".green(), new_value.id()))
            }
            TrackedProperty::Deleted { old_value } => {
                Some(format!("{} {}", "-".red(), old_value.id()))
            }
            TrackedProperty::ContentChanged { value } => {
                Some(format!("{} {}", "~".yellow(), value.id()))
            }
            TrackedProperty::Changed { new_value, .. } => {
                Some(format!("{} {}", "~".yellow(), new_value.id()))
            }
            TrackedProperty::Unchanged { .. } => None,
        })
        .collect()
}

fn print_flat_diff(diff: &FlatDiff) {
    if diff.is_empty() {
        println!("No differences.");
        return;
    }
    for path in &diff.only_in_base {
        println!("{} {}", "-".red(), path);
    }
    for path in &diff.only_in_head {
        println!("{} {}", "+".green(), path);
    }
    for path in &diff.differing {
        println!("{} {}", "~".yellow(), path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn options_from_toml() {
        let options = parse_options(r#"lastPublished = "2024-04-02T09:15:00Z""#).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 4, 2, 9, 15, 0).unwrap();
        assert_eq!(options.last_published, Some(expected));
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(parse_options("").unwrap(), MigrationOptions::default());
    }

    #[test]
    fn flag_overrides_file_value() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let args = MigrationArgs {
            last_published: Some(at),
            options: None,
        };
        assert_eq!(load_options(&args).unwrap().last_published, Some(at));
    }
}
