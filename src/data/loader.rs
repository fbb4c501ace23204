use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{
    CompanyRecord, CompanyTable, EARNINGS_PER_SHARE, NAME, PRICE_EARNINGS, REQUIRED_COLUMNS,
    SECTOR,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why the dataset could not be loaded. Any of these ends the session.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, {column}: '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: empty company name")]
    EmptyName { row: usize },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the company table from a CSV file with a header row.
///
/// Required columns: `Name`, `Sector`, `Earnings/Share`, `Price/Earnings`.
/// Other columns are kept as raw text and shown in the raw-data table only.
pub fn load_csv(path: &Path) -> Result<CompanyTable, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_csv(file)?;
    log::debug!("parsed {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Parse the company table from any CSV byte source.
pub fn read_csv<R: Read>(source: R) -> Result<CompanyTable, DataLoadError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |column: &'static str| {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or(DataLoadError::MissingColumn(column))
    };
    let name_idx = position(NAME)?;
    let sector_idx = position(SECTOR)?;
    let eps_idx = position(EARNINGS_PER_SHARE)?;
    let pe_idx = position(PRICE_EARNINGS)?;

    let extra_idx: Vec<usize> = (0..headers.len())
        .filter(|i| !REQUIRED_COLUMNS.contains(&headers[*i].as_str()))
        .collect();
    let extra_columns = extra_idx.iter().map(|&i| headers[i].clone()).collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let name = field(name_idx);
        if name.is_empty() {
            return Err(DataLoadError::EmptyName { row: row_no });
        }

        records.push(CompanyRecord {
            name: name.to_string(),
            sector: field(sector_idx).to_string(),
            earnings_per_share: parse_number(field(eps_idx), row_no, EARNINGS_PER_SHARE)?,
            price_earnings: parse_number(field(pe_idx), row_no, PRICE_EARNINGS)?,
            extra: extra_idx.iter().map(|&i| field(i).to_string()).collect(),
        });
    }

    Ok(CompanyTable {
        records,
        extra_columns,
    })
}

/// Empty cells become NaN, which no comparison predicate ever selects.
fn parse_number(s: &str, row: usize, column: &'static str) -> Result<f64, DataLoadError> {
    if s.is_empty() {
        return Ok(f64::NAN);
    }
    s.parse::<f64>().map_err(|_| DataLoadError::InvalidNumber {
        row,
        column,
        value: s.to_string(),
    })
}
