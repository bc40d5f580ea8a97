//! CSV loader for Simples Nacional bracket tables.
//!
//! ## CSV Format
//!
//! | Column         | Type    | Notes                                   |
//! |----------------|---------|-----------------------------------------|
//! | `annex`        | string  | `I` or `III`                            |
//! | `lower_bound`  | decimal | First bracket must start at `0`         |
//! | `upper_bound`  | decimal | Inclusive; next bracket starts 0.01 up  |
//! | `nominal_rate` | decimal | Fraction, e.g. `0.06` for 6%            |
//! | `deduction`    | decimal | Amount subtracted from RBT12 × rate     |
//!
//! Rows are grouped by annex in file order. An annex absent from the file
//! keeps its statutory table.
//!
//! ```csv
//! annex,lower_bound,upper_bound,nominal_rate,deduction
//! III,0,180000,0.06,0
//! III,180000.01,360000,0.112,9360
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use regime_core::calculations::SimplifiedRegimeCalculator;
use regime_core::calculations::brackets::{self, BracketTable, BracketTableError};
use regime_core::{Annex, SimplifiedRegimeError, TaxBracket};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading bracket table data.
#[derive(Debug, Error)]
pub enum BracketTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid annex '{annex}' on row {row} (expected I or III)")]
    InvalidAnnex { annex: String, row: usize },

    #[error("Invalid bracket table: {0}")]
    InvalidTable(#[from] BracketTableError),

    #[error("Cannot open '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for BracketTableLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of the bracket CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub annex: String,
    pub lower_bound: Decimal,
    pub upper_bound: Decimal,
    pub nominal_rate: Decimal,
    pub deduction: Decimal,
}

impl From<&BracketRecord> for TaxBracket {
    fn from(record: &BracketRecord) -> Self {
        TaxBracket {
            lower_bound: record.lower_bound,
            upper_bound: record.upper_bound,
            nominal_rate: record.nominal_rate,
            deduction: record.deduction,
        }
    }
}

/// A validated pair of annex tables, ready to back a calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTableSet {
    pub anexo_i: BracketTable,
    pub anexo_iii: BracketTable,
}

impl Default for BracketTableSet {
    fn default() -> Self {
        Self {
            anexo_i: brackets::ANEXO_I.clone(),
            anexo_iii: brackets::ANEXO_III.clone(),
        }
    }
}

impl BracketTableSet {
    pub fn table(
        &self,
        annex: Annex,
    ) -> &BracketTable {
        match annex {
            Annex::AnexoI => &self.anexo_i,
            Annex::AnexoIII => &self.anexo_iii,
        }
    }

    /// A Simples Nacional calculator over these tables.
    pub fn calculator(&self) -> Result<SimplifiedRegimeCalculator<'_>, SimplifiedRegimeError> {
        SimplifiedRegimeCalculator::with_tables(&self.anexo_i, &self.anexo_iii)
    }
}

/// Loader for bracket tables from CSV files.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        debug!(count = records.len(), "parsed bracket records");
        Ok(records)
    }

    /// Group records by annex and validate each resulting table.
    ///
    /// Annexes with no rows keep the statutory table.
    pub fn into_tables(records: &[BracketRecord]) -> Result<BracketTableSet, BracketTableLoaderError> {
        let mut anexo_i = Vec::new();
        let mut anexo_iii = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let annex = Annex::parse(&record.annex).ok_or_else(|| {
                BracketTableLoaderError::InvalidAnnex {
                    annex: record.annex.clone(),
                    row: index + 1,
                }
            })?;
            match annex {
                Annex::AnexoI => anexo_i.push(TaxBracket::from(record)),
                Annex::AnexoIII => anexo_iii.push(TaxBracket::from(record)),
            }
        }

        Ok(BracketTableSet {
            anexo_i: Self::table_or_statutory(Annex::AnexoI, anexo_i)?,
            anexo_iii: Self::table_or_statutory(Annex::AnexoIII, anexo_iii)?,
        })
    }

    fn table_or_statutory(
        annex: Annex,
        rows: Vec<TaxBracket>,
    ) -> Result<BracketTable, BracketTableLoaderError> {
        if rows.is_empty() {
            info!(annex = %annex, "no rows in file; keeping statutory table");
            return Ok(brackets::statutory(annex).clone());
        }
        let count = rows.len();
        let table = BracketTable::from_brackets(annex, rows)?;
        info!(annex = %annex, brackets = count, ceiling = %table.ceiling(), "loaded custom table");
        Ok(table)
    }

    /// Parse and validate a bracket CSV file from disk.
    pub fn load_from_file(path: &Path) -> Result<BracketTableSet, BracketTableLoaderError> {
        let file = File::open(path).map_err(|source| BracketTableLoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records = Self::parse(file)?;
        Self::into_tables(&records)
    }
}
