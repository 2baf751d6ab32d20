//! Movement geometry per piece type.
//!
//! A rule only answers whether a displacement is legal for its type. Rules
//! never look at the board: obstruction and occupancy are resolved by the
//! caller before any rule is asked.

use chess_common::{PieceColor, PieceKind, Square};

/// Geometric legality of a move or capture for one piece type.
pub trait MoveRule {
    fn kind(&self) -> PieceKind;

    /// True if moving from `from` to an empty `to` is legal for this type.
    fn validate_move(&self, from: Square, to: Square) -> bool;

    /// True if capturing on `to` from `from` is legal for this type.
    ///
    /// Most types capture the way they move.
    fn validate_capture(&self, from: Square, to: Square) -> bool {
        self.validate_move(from, to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Knight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bishop;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rook;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Queen;

/// Pawn geometry depends on color and on whether the pawn has moved yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pawn {
    color: PieceColor,
    first_move: bool,
}

impl MoveRule for Knight {
    fn kind(&self) -> PieceKind {
        PieceKind::Knight
    }

    fn validate_move(&self, from: Square, to: Square) -> bool {
        matches!(
            (from.rank_delta(to).abs(), from.file_delta(to).abs()),
            (2, 1) | (1, 2)
        )
    }
}

impl MoveRule for Bishop {
    fn kind(&self) -> PieceKind {
        PieceKind::Bishop
    }

    fn validate_move(&self, from: Square, to: Square) -> bool {
        let rank_delta = from.rank_delta(to).abs();
        rank_delta != 0 && rank_delta == from.file_delta(to).abs()
    }
}

impl MoveRule for Rook {
    fn kind(&self) -> PieceKind {
        PieceKind::Rook
    }

    fn validate_move(&self, from: Square, to: Square) -> bool {
        // Exactly one axis changes.
        (from.rank == to.rank) != (from.file == to.file)
    }
}

impl MoveRule for Queen {
    fn kind(&self) -> PieceKind {
        PieceKind::Queen
    }

    fn validate_move(&self, from: Square, to: Square) -> bool {
        Rook.validate_move(from, to) || Bishop.validate_move(from, to)
    }
}

impl Pawn {
    pub fn new(color: PieceColor) -> Self {
        Self {
            color,
            first_move: true,
        }
    }

    /// Whether the two-square advance is still available.
    pub fn is_first_move(&self) -> bool {
        self.first_move
    }

    /// Locks the pawn to single-square advances from now on.
    pub fn mark_moved(&mut self) {
        self.first_move = false;
    }

    fn max_advance(&self) -> i16 {
        if self.first_move {
            2
        } else {
            1
        }
    }
}

impl MoveRule for Pawn {
    fn kind(&self) -> PieceKind {
        PieceKind::Pawn
    }

    fn validate_move(&self, from: Square, to: Square) -> bool {
        if from.file != to.file {
            return false;
        }
        let advance = from.rank_delta(to) * self.color.forward();
        (1..=self.max_advance()).contains(&advance)
    }

    fn validate_capture(&self, from: Square, to: Square) -> bool {
        from.file_delta(to).abs() == 1 && from.rank_delta(to) == self.color.forward()
    }
}

/// One member of a piece's candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceRule {
    Pawn(Pawn),
    Knight(Knight),
    Bishop(Bishop),
    Rook(Rook),
    Queen(Queen),
}

impl PieceRule {
    fn as_rule(&self) -> &dyn MoveRule {
        match self {
            Self::Pawn(rule) => rule,
            Self::Knight(rule) => rule,
            Self::Bishop(rule) => rule,
            Self::Rook(rule) => rule,
            Self::Queen(rule) => rule,
        }
    }

    /// The rule as it stands once a move it validated has been played.
    pub(crate) fn after_move(mut self) -> Self {
        if let Self::Pawn(ref mut pawn) = self {
            pawn.mark_moved();
        }
        self
    }
}

impl MoveRule for PieceRule {
    fn kind(&self) -> PieceKind {
        self.as_rule().kind()
    }

    fn validate_move(&self, from: Square, to: Square) -> bool {
        self.as_rule().validate_move(from, to)
    }

    fn validate_capture(&self, from: Square, to: Square) -> bool {
        self.as_rule().validate_capture(from, to)
    }
}

/// The color-independent rules, in a fixed order.
///
/// Pawn is left out because it cannot be built without a color; see
/// [`starting_rules`].
pub fn generic_rules() -> [PieceRule; 4] {
    [
        PieceRule::Knight(Knight),
        PieceRule::Bishop(Bishop),
        PieceRule::Rook(Rook),
        PieceRule::Queen(Queen),
    ]
}

/// Every rule a freshly placed piece of `color` could follow.
pub fn starting_rules(color: PieceColor) -> impl Iterator<Item = PieceRule> {
    generic_rules()
        .into_iter()
        .chain(std::iter::once(PieceRule::Pawn(Pawn::new(color))))
}
