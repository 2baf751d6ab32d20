//! Chess rules engine for pieces of unknown type.
//!
//! Every piece starts out as any of Pawn, Knight, Bishop, Rook or Queen and
//! is narrowed by the moves it is allowed to make. The [`Game`] runs each
//! attempt through obstruction, capture, rule and turn checks before it
//! appends a new [`BoardState`] to the [`BoardHistory`].

pub mod adjudicator;
pub mod board_state;
pub mod game;
pub mod history;
pub mod occupant;
pub mod piece;
pub mod rules;

pub use adjudicator::{Adjudicator, Turn, TurnAdjudicator};
pub use board_state::{BoardError, BoardState, DEFAULT_FILES, DEFAULT_RANKS};
pub use chess_common::{PieceColor, PieceKind, Square};
pub use game::{Game, GameError, MoveOutcome, Rejection};
pub use history::{BoardHistory, HistoryError};
pub use occupant::Occupant;
pub use piece::{CandidateSet, Piece, PieceId};
pub use rules::{MoveRule, PieceRule};
