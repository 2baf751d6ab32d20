//! Piece identities and their narrowing candidate sets.
//!
//! A piece is never told what it is. It starts out as "any of the five
//! movers" and every accepted move keeps only the rules that allowed it.

use chess_common::{PieceColor, PieceKind, Square};
use serde::Serialize;
use smallvec::SmallVec;

use crate::rules::{self, MoveRule, PieceRule};

/// Handle to a piece owned by a [`Game`](crate::Game) roster.
///
/// Board cells and captured lists store handles, so copies of a board
/// refer to the same piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PieceId(u32);

impl PieceId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The rules a piece could still be following. Only ever shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    rules: SmallVec<[PieceRule; 5]>,
}

impl CandidateSet {
    /// All five rule variants, with a pawn that advances in `color`'s direction.
    pub fn starting(color: PieceColor) -> Self {
        Self {
            rules: rules::starting_rules(color).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceRule> {
        self.rules.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.rules.iter().map(|rule| rule.kind())
    }

    pub fn contains(&self, kind: PieceKind) -> bool {
        self.kinds().any(|k| k == kind)
    }

    /// The piece's type, once its history leaves exactly one candidate.
    pub fn resolved(&self) -> Option<PieceKind> {
        match self.rules.as_slice() {
            [only] => Some(only.kind()),
            _ => None,
        }
    }

    pub fn can_move(&self, from: Square, to: Square) -> bool {
        self.rules.iter().any(|rule| rule.validate_move(from, to))
    }

    pub fn can_capture(&self, from: Square, to: Square) -> bool {
        self.rules.iter().any(|rule| rule.validate_capture(from, to))
    }

    /// The candidates left after this piece plays `from -> to` as a move.
    /// A surviving Pawn loses its double step.
    pub fn narrowed_to_move(&self, from: Square, to: Square) -> Self {
        Self {
            rules: self
                .rules
                .iter()
                .filter(|rule| rule.validate_move(from, to))
                .map(|rule| rule.after_move())
                .collect(),
        }
    }

    /// The candidates left after this piece captures on `to` from `from`.
    /// Capturing leaves the Pawn first-move flag alone.
    pub fn narrowed_to_capture(&self, from: Square, to: Square) -> Self {
        Self {
            rules: self
                .rules
                .iter()
                .filter(|rule| rule.validate_capture(from, to))
                .copied()
                .collect(),
        }
    }
}

/// A piece on (or captured from) the board.
#[derive(Debug, Clone)]
pub struct Piece {
    id: PieceId,
    color: PieceColor,
    candidates: CandidateSet,
}

impl Piece {
    pub(crate) fn new(id: PieceId, color: PieceColor) -> Self {
        Self {
            id,
            color,
            candidates: CandidateSet::starting(color),
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn color(&self) -> PieceColor {
        self.color
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub(crate) fn set_candidates(&mut self, candidates: CandidateSet) {
        self.candidates = candidates;
    }
}
