mod normalizer;
mod parser;
mod record;
mod store;

pub use record::{ListingRecord, SalaryPeriod, UNKNOWN_COMPANY};
pub use store::{ListingQuery, ListingStore, StoreError, UpsertOutcome};

use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum ListingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ListingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingImportError::Io(err) => write!(f, "failed to read listing export: {}", err),
            ListingImportError::Csv(err) => write!(f, "invalid listing CSV data: {}", err),
        }
    }
}

impl std::error::Error for ListingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListingImportError::Io(err) => Some(err),
            ListingImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ListingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ListingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Listings read from an export together with the rows that were dropped.
#[derive(Debug, Clone, Default)]
pub struct ListingImport {
    pub listings: Vec<ListingRecord>,
    pub skipped_rows: usize,
}

pub struct ListingImporter;

impl ListingImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ListingImport, ListingImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads a CSV export with the persisted column layout. Rows whose date
    /// or salary bounds cannot be read are skipped rather than failing the
    /// whole import.
    pub fn from_reader<R: Read>(reader: R) -> Result<ListingImport, ListingImportError> {
        let parsed = parser::parse_records(reader)?;
        info!(
            imported = parsed.listings.len(),
            skipped = parsed.skipped,
            "listing export parsed"
        );

        Ok(ListingImport {
            listings: parsed.listings,
            skipped_rows: parsed.skipped,
        })
    }
}
