//! Station adjacency list reader.
//!
//! The format is line oriented. The first line is a header and is skipped.
//! Every other non-blank line holds a station name and the name of the
//! station upstream of it, separated by whitespace and/or commas. The root
//! carries a marker (normally `None`) in place of a parent.
//!
//! ```text
//! station upstream
//! A-B None
//! B A-B
//! B-C B
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use super::IngestError;
use crate::domain::StationName;
use crate::network::StationRecord;

/// Parse topology records from text, in file order.
pub fn parse_topology(text: &str, root_marker: &str) -> Result<Vec<StationRecord>, IngestError> {
    let mut records = Vec::new();

    for (idx, line) in text.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let tokens: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();

        let (station, parent) = match tokens.as_slice() {
            [] => continue,
            [station, parent] => (*station, *parent),
            _ => {
                return Err(IngestError::MalformedLine {
                    line: line_no,
                    content: line.to_string(),
                });
            }
        };

        let name = parse_name(station, line_no)?;
        let parent = if parent == root_marker {
            None
        } else {
            Some(parse_name(parent, line_no)?)
        };

        records.push(StationRecord::new(name, parent));
    }

    debug!(records = records.len(), "parsed topology");
    Ok(records)
}

/// Read and parse a topology file.
pub fn read_topology(path: &Path, root_marker: &str) -> Result<Vec<StationRecord>, IngestError> {
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_topology(&text, root_marker)
}

fn parse_name(s: &str, line: usize) -> Result<StationName, IngestError> {
    StationName::parse(s).map_err(|source| IngestError::InvalidStationName { line, source })
}
