use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use regime_core::Annex;
use regime_data::BracketTableLoader;

/// Validate a Simples Nacional bracket table CSV file.
///
/// The CSV file should have the following columns:
/// - annex: I or III
/// - lower_bound: first revenue covered by the bracket
/// - upper_bound: last revenue covered by the bracket (inclusive)
/// - nominal_rate: nominal rate as a fraction (e.g., 0.06)
/// - deduction: amount deducted from RBT12 × nominal_rate
#[derive(Parser, Debug)]
#[command(name = "regime-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing bracket data
    #[arg(short, long)]
    file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Checking bracket tables in: {}", args.file.display());

    let tables = BracketTableLoader::load_from_file(&args.file)
        .with_context(|| format!("Invalid bracket file: {}", args.file.display()))?;

    for annex in [Annex::AnexoI, Annex::AnexoIII] {
        let table = tables.table(annex);
        println!("{annex} (ceiling {}):", table.ceiling());
        for (index, bracket) in table.brackets().iter().enumerate() {
            println!(
                "  {}: {} – {} rate {} deduction {}",
                index + 1,
                bracket.lower_bound,
                bracket.upper_bound,
                bracket.nominal_rate,
                bracket.deduction
            );
        }
    }

    println!("Tables are valid.");
    Ok(())
}
