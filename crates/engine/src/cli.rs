//! Command-line interface for the `sheetkeep` binary.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use sheetkeep_domain::{SheetData, SheetLedger, SystemId};

use crate::app::App;
use crate::use_cases::character_sheet::CharacterSheetError;

/// Top-level CLI parser for the `sheetkeep` binary.
#[derive(Debug, Parser)]
#[command(name = "sheetkeep", version, about = "Normalize, check and roll character sheets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print the normalized sheet and its ledger.
    Normalize(SheetArgs),
    /// Check the sheet would be accepted on save.
    Check(SheetArgs),
    /// Roll every ability in the system's roll plan.
    Roll(SheetArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SheetArgs {
    /// Rule system: cthulhu6, cthulhu7, sw25 or shinobigami.
    pub system: SystemId,
    /// Sheet JSON, bare or in the stored `{system, data}` shape.
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct NormalizedOutput<'a> {
    sheet: &'a SheetData,
    ledger: SheetLedger,
    warnings: bool,
}

/// Sheet data from a file, unwrapping the stored shape when present.
fn sheet_data(raw: &Value) -> &Value {
    match (raw.get("system"), raw.get("data")) {
        (Some(Value::String(_)), Some(data)) => data,
        _ => raw,
    }
}

async fn read_sheet(args: &SheetArgs) -> anyhow::Result<SheetData> {
    let text = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("reading {}", args.file.display()))?;
    let raw: Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing {} as JSON", args.file.display()))?;
    Ok(SheetData::normalize(args.system, sheet_data(&raw)))
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn run(cli: Cli, app: &App) -> anyhow::Result<()> {
    match cli.command {
        Commands::Normalize(args) => {
            let sheet = read_sheet(&args).await?;
            let ledger = sheet.ledger();
            print_json(&NormalizedOutput {
                sheet: &sheet,
                warnings: ledger.has_warnings(),
                ledger,
            })
        }
        Commands::Check(args) => {
            let sheet = read_sheet(&args).await?;
            let name = args
                .file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let ledger = sheet.ledger();
            match app
                .use_cases
                .character_sheet
                .save(sheetkeep_domain::CharacterId::new(), name, sheet)
                .await
            {
                Ok(record) => {
                    if ledger.has_warnings() {
                        eprintln!("warning: advisory limits exceeded");
                    }
                    println!("ok: {} sheet can be saved", record.sheet.system());
                    Ok(())
                }
                Err(CharacterSheetError::PointBudgetExceeded(budget)) => {
                    print_json(&budget)?;
                    anyhow::bail!(
                        "skill point budget exceeded: job {}/{}, interest {}/{}",
                        budget.job_total,
                        budget.job_limit,
                        budget.interest_total,
                        budget.interest_limit
                    )
                }
                Err(e) => Err(e.into()),
            }
        }
        Commands::Roll(args) => {
            let sheet = read_sheet(&args).await?;
            let outcome = app.use_cases.character_sheet.roll_abilities(&sheet).await?;
            for skipped in &outcome.skipped {
                eprintln!("skipped {}: {}", skipped.label, skipped.reason);
            }
            print_json(&outcome)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_system_and_file() {
        let cli = Cli::try_parse_from(["sheetkeep", "check", "cthulhu", "hero.json"]).unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.system, SystemId::Cthulhu6);
                assert_eq!(args.file, PathBuf::from("hero.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn unknown_system_is_a_usage_error() {
        assert!(Cli::try_parse_from(["sheetkeep", "roll", "dnd5e", "hero.json"]).is_err());
    }

    #[test]
    fn stored_shape_is_unwrapped() {
        let stored = json!({ "system": "sw25", "data": { "race": "エルフ" } });
        assert_eq!(sheet_data(&stored), &json!({ "race": "エルフ" }));

        let bare = json!({ "data": "not a wrapper" });
        assert_eq!(sheet_data(&bare), &bare);
    }
}
