//! CSV loading of flat multiplicity tables.
//!
//! Dumps carry a header line whose names match the row struct fields (`ra`, `dec`,
//! `sp1`, `per`, …). Empty cells deserialize to `None`.
use std::io::Read;

use camino::Utf8Path;
use log::info;
use serde::de::DeserializeOwned;

use crate::stellar_errors::StellarError;

/// Read every row of a CSV file.
pub fn read_table<R: DeserializeOwned>(path: &Utf8Path) -> Result<Vec<R>, StellarError> {
    let file = std::fs::File::open(path)?;
    let rows = read_table_from(file)?;
    info!("Loaded {} rows from {path}", rows.len());
    Ok(rows)
}

/// Read every row of CSV data from any reader.
pub fn read_table_from<R: DeserializeOwned, T: Read>(reader: T) -> Result<Vec<R>, StellarError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader
        .deserialize::<R>()
        .map(|row| row.map_err(StellarError::from))
        .collect()
}
