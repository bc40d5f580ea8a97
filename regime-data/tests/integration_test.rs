//! Integration tests for bracket table loading from on-disk CSV files.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use regime_core::calculations::SimplifiedRegimeInput;
use regime_core::calculations::brackets::{ANEXO_I, ANEXO_III};
use regime_core::calculations::rbt12::ActivityDuration;
use regime_core::{Annex, SimplifiedRegimeError};
use regime_data::{BracketTableLoader, BracketTableLoaderError};
use rust_decimal_macros::dec;

const STATUTORY_CSV: &str = include_str!("../test-data/anexos_2018.csv");

fn test_data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(name)
}

#[test]
fn test_statutory_csv_reproduces_builtin_tables() {
    let records = BracketTableLoader::parse(STATUTORY_CSV.as_bytes()).expect("Failed to parse CSV");
    assert_eq!(records.len(), 12);

    let tables = BracketTableLoader::into_tables(&records).expect("Failed to build tables");

    assert_eq!(tables.anexo_i, ANEXO_I);
    assert_eq!(tables.anexo_iii, ANEXO_III);
}

#[test]
fn test_load_from_file_reads_both_annexes() {
    let tables = BracketTableLoader::load_from_file(&test_data("anexos_2018.csv"))
        .expect("fixture should load");

    assert_eq!(tables.table(Annex::AnexoI).brackets().len(), 6);
    assert_eq!(tables.table(Annex::AnexoIII).brackets().len(), 6);
}

#[test]
fn test_reduced_table_lowers_ceiling_for_commerce() {
    let tables = BracketTableLoader::load_from_file(&test_data("anexo_i_reduced.csv"))
        .expect("fixture should load");

    assert_eq!(tables.anexo_i.ceiling(), dec!(360000));
    // Anexo III is absent from the file and stays statutory.
    assert_eq!(tables.anexo_iii, ANEXO_III);

    let calculator = tables.calculator().expect("annexes in the right slots");
    let input = SimplifiedRegimeInput {
        total_revenue: dec!(40000),
        service_percent: 50,
        rbt12_input: None,
        duration: ActivityDuration::TwelveMonthsOrMore,
    };

    let result = calculator.calculate(&input);

    assert_eq!(
        result,
        Err(SimplifiedRegimeError::Disqualified {
            rbt12: dec!(480000),
            ceiling: dec!(360000),
        })
    );
}

#[test]
fn test_load_nonexistent_file_returns_err() {
    let result = BracketTableLoader::load_from_file(Path::new("/this/path/does/not/exist.csv"));

    assert!(matches!(result, Err(BracketTableLoaderError::Io { .. })));
}
