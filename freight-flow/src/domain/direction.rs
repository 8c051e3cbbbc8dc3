//! Travel direction relative to the network root.

use std::fmt;

use serde::Serialize;

/// Direction of travel along a tree edge.
///
/// `Up` runs from a node towards its parent (towards the root), `Down` runs
/// from a node towards one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Parse a single-character direction tag (`u` or `d`, either case).
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'u' | 'U' => Some(Direction::Up),
            'd' | 'D' => Some(Direction::Down),
            _ => None,
        }
    }

    /// The lowercase tag character for this direction.
    pub fn tag(self) -> char {
        match self {
            Direction::Up => 'u',
            Direction::Down => 'd',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}
