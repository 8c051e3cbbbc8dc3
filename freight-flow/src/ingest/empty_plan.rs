//! Readers for empty-wagon plan inputs.
//!
//! Both files are headed CSV tables:
//!
//! ```text
//! station,loss
//! B,-6
//! C,13
//! ```
//!
//! ```text
//! interval,distance,up,down
//! B,70,0,6
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::IngestError;
use crate::rebalance::{IntervalTransfer, StationLoss};

pub fn parse_losses<R: Read>(reader: R) -> Result<Vec<StationLoss>, IngestError> {
    parse_rows(reader)
}

pub fn parse_transfers<R: Read>(reader: R) -> Result<Vec<IntervalTransfer>, IngestError> {
    parse_rows(reader)
}

pub fn read_losses(path: &Path) -> Result<Vec<StationLoss>, IngestError> {
    parse_losses(open(path)?)
}

pub fn read_transfers(path: &Path) -> Result<Vec<IntervalTransfer>, IngestError> {
    parse_transfers(open(path)?)
}

fn parse_rows<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let rows = csv_reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()?;

    debug!(rows = rows.len(), "parsed plan table");
    Ok(rows)
}

fn open(path: &Path) -> Result<File, IngestError> {
    File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })
}
