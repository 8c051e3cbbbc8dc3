//! Station name type.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station name: {reason}")]
pub struct InvalidStationName {
    reason: &'static str,
}

/// Separator that marks a node as a track segment between two stations.
const SEGMENT_SEPARATOR: char = '-';

/// A validated station (or segment) name.
///
/// Names are non-empty and contain no whitespace or commas, so they survive
/// the whitespace/comma separated topology format unchanged. A name such as
/// `B-C` denotes the track segment between stations `B` and `C`.
///
/// # Examples
///
/// ```
/// use freight_flow::domain::StationName;
///
/// let b = StationName::parse("B").unwrap();
/// assert!(!b.is_segment());
///
/// let bc = StationName::parse("B-C").unwrap();
/// assert!(bc.is_segment());
///
/// assert!(StationName::parse("").is_err());
/// assert!(StationName::parse("B C").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct StationName(String);

impl StationName {
    /// Parse a station name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationName> {
        let s = s.trim();

        if s.is_empty() {
            return Err(InvalidStationName {
                reason: "must not be empty",
            });
        }

        if s.chars().any(|c| c.is_whitespace() || c == ',') {
            return Err(InvalidStationName {
                reason: "must not contain whitespace or commas",
            });
        }

        Ok(StationName(s.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this name denotes a track segment rather than a point station.
    pub fn is_segment(&self) -> bool {
        self.0.contains(SEGMENT_SEPARATOR)
    }
}

impl TryFrom<String> for StationName {
    type Error = InvalidStationName;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<StationName> for String {
    fn from(name: StationName) -> Self {
        name.0
    }
}

// Hashes identically to the inner `String`, so maps keyed by name can be
// queried with a plain `&str`.
impl Borrow<str> for StationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.0)
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
