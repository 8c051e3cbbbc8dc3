//! OD matrix cell values.

use std::fmt;

use super::Direction;

/// Error returned when parsing an invalid OD volume.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid volume: {reason}")]
pub struct InvalidVolume {
    reason: &'static str,
}

/// A wagon count read from one OD matrix cell.
///
/// Off-diagonal cells carry a plain count. Diagonal cells (traffic that
/// starts and ends in the same unit) carry a direction tag suffix, e.g. `5u`.
///
/// # Examples
///
/// ```
/// use freight_flow::domain::{Direction, OdVolume};
///
/// assert_eq!(OdVolume::parse("12").unwrap(), OdVolume::Plain(12));
/// assert_eq!(
///     OdVolume::parse("5u").unwrap(),
///     OdVolume::Tagged { volume: 5, direction: Direction::Up },
/// );
/// assert!(OdVolume::parse("-3").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OdVolume {
    Plain(u64),
    Tagged { volume: u64, direction: Direction },
}

impl OdVolume {
    /// Parse a cell value.
    ///
    /// Accepts `<digits>` with an optional `u`/`d` suffix. A trailing `.0`
    /// on the number is tolerated, since spreadsheet exports often write
    /// whole counts as floats.
    pub fn parse(s: &str) -> Result<Self, InvalidVolume> {
        let s = s.trim();

        let (number, direction) = match s.chars().last() {
            None => {
                return Err(InvalidVolume {
                    reason: "must not be empty",
                });
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let direction = Direction::from_tag(c).ok_or(InvalidVolume {
                    reason: "direction tag must be 'u' or 'd'",
                })?;
                (&s[..s.len() - 1], Some(direction))
            }
            Some(_) => (s, None),
        };

        let volume = parse_count(number)?;

        Ok(match direction {
            Some(direction) => OdVolume::Tagged { volume, direction },
            None => OdVolume::Plain(volume),
        })
    }

    /// The wagon count, regardless of tagging.
    pub fn volume(&self) -> u64 {
        match *self {
            OdVolume::Plain(volume) => volume,
            OdVolume::Tagged { volume, .. } => volume,
        }
    }

    /// The direction tag, if any.
    pub fn direction(&self) -> Option<Direction> {
        match *self {
            OdVolume::Plain(_) => None,
            OdVolume::Tagged { direction, .. } => Some(direction),
        }
    }
}

fn parse_count(s: &str) -> Result<u64, InvalidVolume> {
    let digits = s.strip_suffix(".0").unwrap_or(s);

    if digits.is_empty() {
        return Err(InvalidVolume {
            reason: "missing wagon count",
        });
    }

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidVolume {
            reason: "wagon count must be a non-negative integer",
        });
    }

    digits.parse().map_err(|_| InvalidVolume {
        reason: "wagon count out of range",
    })
}

impl fmt::Display for OdVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OdVolume::Plain(volume) => write!(f, "{volume}"),
            OdVolume::Tagged { volume, direction } => write!(f, "{volume}{}", direction.tag()),
        }
    }
}
