//! OD matrix reader.
//!
//! The matrix is a CSV table. The header row names the destinations (its
//! first cell is a label and is ignored); every following row starts with
//! the origin name. Empty cells mean no traffic. Diagonal cells carry a
//! direction suffix:
//!
//! ```text
//! origin,A,B
//! A,3u,12
//! B,,5d
//! ```
//!
//! A station may head at most one column and at most one row.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::IngestError;
use crate::domain::{OdVolume, StationName};
use crate::flow::OdMatrix;

/// Parse an OD matrix from CSV.
pub fn parse_od_matrix<R: Read>(reader: R) -> Result<OdMatrix, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = csv_reader.records();

    let header = rows.next().ok_or(IngestError::MissingHeader)??;
    let destinations = header
        .iter()
        .skip(1)
        .map(|cell| {
            StationName::parse(cell)
                .map_err(|source| IngestError::InvalidStationName { line: 1, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    for destination in &destinations {
        if !seen.insert(destination) {
            return Err(IngestError::DuplicateStation {
                line: 1,
                station: destination.clone(),
            });
        }
    }

    let mut origins = HashSet::new();
    let mut matrix = OdMatrix::new();

    for row in rows {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line() as usize);

        if row.len() != header.len() {
            return Err(IngestError::RaggedRow {
                line,
                expected: header.len(),
                found: row.len(),
            });
        }

        let origin = StationName::parse(&row[0])
            .map_err(|source| IngestError::InvalidStationName { line, source })?;
        if !origins.insert(origin.clone()) {
            return Err(IngestError::DuplicateStation {
                line,
                station: origin,
            });
        }

        for (cell, destination) in row.iter().skip(1).zip(&destinations) {
            if cell.is_empty() {
                continue;
            }

            let volume = OdVolume::parse(cell).map_err(|source| IngestError::InvalidVolume {
                origin: origin.clone(),
                destination: destination.clone(),
                value: cell.to_string(),
                source,
            })?;
            matrix.push(origin.clone(), destination.clone(), volume);
        }
    }

    debug!(
        cells = matrix.len(),
        wagons = matrix.total_volume(),
        "parsed OD matrix"
    );
    Ok(matrix)
}

/// Read and parse an OD matrix file.
pub fn read_od_matrix(path: &Path) -> Result<OdMatrix, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_od_matrix(file)
}
