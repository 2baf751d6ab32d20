//! Rank/file board coordinates.
//!
//! A [`Square`] carries no board dimensions; bounds are checked by whichever
//! board it indexes.

use serde::{Deserialize, Serialize};

/// A 0-based (rank, file) pair. Rank is the row, file the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub rank: u8,
    pub file: u8,
}

impl Square {
    pub const fn new(rank: u8, file: u8) -> Self {
        Self { rank, file }
    }

    /// Signed rank displacement from `self` to `to`.
    pub fn rank_delta(self, to: Square) -> i16 {
        i16::from(to.rank) - i16::from(self.rank)
    }

    /// Signed file displacement from `self` to `to`.
    pub fn file_delta(self, to: Square) -> i16 {
        i16::from(to.file) - i16::from(self.file)
    }
}

impl From<(u8, u8)> for Square {
    fn from((rank, file): (u8, u8)) -> Self {
        Self::new(rank, file)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.rank, self.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deltas_are_signed() {
        let from = Square::new(1, 3);
        let to = Square::new(0, 5);
        assert_eq!(from.rank_delta(to), -1);
        assert_eq!(from.file_delta(to), 2);
        assert_eq!(to.rank_delta(from), 1);
    }

    #[test]
    fn test_from_tuple() {
        assert_eq!(Square::from((2, 7)), Square::new(2, 7));
    }

    #[test]
    fn test_display() {
        assert_eq!(Square::new(0, 1).to_string(), "(0, 1)");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Square::new(6, 4)).unwrap();
        assert_eq!(json, r#"{"rank":6,"file":4}"#);
        let back: Square = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Square::new(6, 4));
    }
}
