//! A single board cell.

use crate::piece::PieceId;

/// Zero or one piece on a square. Holds a handle, never the piece itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Occupant {
    #[default]
    Empty,
    Occupied(PieceId),
}

impl Occupant {
    pub fn has_piece(self) -> bool {
        matches!(self, Self::Occupied(_))
    }

    pub fn maybe_piece(self) -> Option<PieceId> {
        match self {
            Self::Occupied(id) => Some(id),
            Self::Empty => None,
        }
    }
}
