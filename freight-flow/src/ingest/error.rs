//! Input file errors.

use std::path::PathBuf;

use crate::domain::{InvalidStationName, InvalidVolume, StationName};

/// Errors raised while reading topology or OD input.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The input file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A topology line did not hold exactly a station and its parent
    #[error("line {line}: expected `station parent`, got {content:?}")]
    MalformedLine { line: usize, content: String },

    /// A station name failed validation
    #[error("line {line}: {source}")]
    InvalidStationName {
        line: usize,
        #[source]
        source: InvalidStationName,
    },

    /// An OD cell held something other than a wagon count
    #[error("cell {origin} -> {destination} holds {value:?}: {source}")]
    InvalidVolume {
        origin: StationName,
        destination: StationName,
        value: String,
        #[source]
        source: InvalidVolume,
    },

    /// An OD row does not line up with the header
    #[error("line {line}: row has {found} cells, header has {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A station heads more than one OD row or column
    #[error("line {line}: station {station} appears more than once")]
    DuplicateStation { line: usize, station: StationName },

    /// The OD matrix was empty
    #[error("OD matrix has no header row")]
    MissingHeader,
}
