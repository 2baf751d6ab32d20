//! Append-only sequence of board snapshots.

use chess_common::Square;

use crate::board_state::{BoardError, BoardState, DEFAULT_FILES, DEFAULT_RANKS};
use crate::piece::PieceId;

/// Every board state the game has passed through, oldest first.
///
/// The first state is created lazily by the first placement. Moves and
/// captures append a new state derived from the current one; nothing is
/// ever removed or reordered.
#[derive(Debug, Clone)]
pub struct BoardHistory {
    ranks: u8,
    files: u8,
    states: Vec<BoardState>,
}

impl Default for BoardHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardHistory {
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_RANKS, DEFAULT_FILES)
    }

    /// A history whose initial state will be a `ranks` x `files` board.
    pub fn with_dimensions(ranks: u8, files: u8) -> Self {
        Self {
            ranks,
            files,
            states: Vec::new(),
        }
    }

    /// The latest snapshot, if any piece has been placed yet.
    pub fn current(&self) -> Option<&BoardState> {
        self.states.last()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BoardState> {
        self.states.get(index)
    }

    /// Places `piece` on the initial state without recording a new snapshot.
    ///
    /// Only valid while setting up the opening position. Once a move has
    /// been appended the recorded states are frozen and this fails with
    /// [`HistoryError::SetupClosed`].
    pub fn add_piece_to_board(&mut self, piece: PieceId, square: Square) -> Result<(), HistoryError> {
        if self.states.len() > 1 {
            return Err(HistoryError::SetupClosed {
                snapshots: self.states.len(),
            });
        }
        if self.states.is_empty() {
            self.states
                .push(BoardState::with_dimensions(self.ranks, self.files));
        }
        let last = self.states.len() - 1;
        Ok(self.states[last].set_piece_in_place(piece, square)?)
    }

    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<(), HistoryError> {
        let next = self.current_or_err()?.move_piece(from, to)?;
        self.states.push(next);
        Ok(())
    }

    pub fn capture_piece(&mut self, from: Square, to: Square) -> Result<(), HistoryError> {
        let next = self.current_or_err()?.capture_piece(from, to)?;
        self.states.push(next);
        Ok(())
    }

    fn current_or_err(&self) -> Result<&BoardState, HistoryError> {
        self.current().ok_or(HistoryError::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("no board state yet: place a piece first")]
    Empty,
    #[error("setup is closed: {snapshots} snapshots already recorded")]
    SetupClosed { snapshots: usize },
    #[error(transparent)]
    Board(#[from] BoardError),
}
