//! Turn order.
//!
//! The adjudicator is the last gate a move passes before it is committed.
//! It only looks at whose turn it is; geometry has already been checked.

use chess_common::{PieceColor, Square};
use serde::Serialize;

use crate::piece::Piece;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    #[default]
    WhiteToMove,
    BlackToMove,
}

impl Turn {
    pub fn color(self) -> PieceColor {
        match self {
            Self::WhiteToMove => PieceColor::White,
            Self::BlackToMove => PieceColor::Black,
        }
    }

    /// The turn after this one.
    pub fn next(self) -> Self {
        match self {
            Self::WhiteToMove => Self::BlackToMove,
            Self::BlackToMove => Self::WhiteToMove,
        }
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to move", self.color())
    }
}

/// Decides whether a piece may move now, and advances the turn.
pub trait Adjudicator {
    fn validate_move(&self, piece: &Piece, from: Square, to: Square) -> bool;

    /// Hand the move to the next side. Callers only invoke this after a
    /// move has been fully accepted.
    fn end_turn(&mut self);

    fn turn(&self) -> Turn;
}

/// Strict White/Black alternation with no end state.
#[derive(Debug, Clone, Default)]
pub struct TurnAdjudicator {
    turn: Turn,
}

impl TurnAdjudicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Adjudicator for TurnAdjudicator {
    fn validate_move(&self, piece: &Piece, _from: Square, _to: Square) -> bool {
        piece.color() == self.turn.color()
    }

    fn end_turn(&mut self) {
        self.turn = self.turn.next();
    }

    fn turn(&self) -> Turn {
        self.turn
    }
}
