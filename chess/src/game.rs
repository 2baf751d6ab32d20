use chess_common::{PieceColor, Square};
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::adjudicator::{Adjudicator, Turn, TurnAdjudicator};
use crate::board_state::{BoardError, BoardState, DEFAULT_FILES, DEFAULT_RANKS};
use crate::history::{BoardHistory, HistoryError};
use crate::piece::{CandidateSet, Piece, PieceId};

/// Main game state: the piece roster, the board history and the turn gate.
#[derive(Debug, Clone)]
pub struct Game<A = TurnAdjudicator> {
    pieces: Vec<Piece>,
    history: BoardHistory,
    adjudicator: A,
}

/// Why a move attempt was turned down. Rejections never change any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// The piece was dropped back where it started.
    SameSquare,
    /// Another piece stands between the two squares.
    Obstructed,
    /// The destination holds a piece of the mover's color.
    OwnPiece,
    /// No remaining candidate rule allows this move.
    IllegalMove,
    /// No remaining candidate rule allows this capture.
    IllegalCapture,
    /// It is the other side's turn.
    WrongTurn,
}

impl Rejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SameSquare => "same square",
            Self::Obstructed => "path obstructed",
            Self::OwnPiece => "destination holds own piece",
            Self::IllegalMove => "no candidate allows this move",
            Self::IllegalCapture => "no candidate allows this capture",
            Self::WrongTurn => "not this side's turn",
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a move attempt that did not violate any contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    Moved,
    Captured { captured: PieceId },
    Rejected { reason: Rejection },
}

impl MoveOutcome {
    /// True if the move was committed and the turn passed.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, Self::Captured { .. })
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected { reason } => Some(*reason),
            _ => None,
        }
    }
}

/// How an attempt will be applied once every check has passed.
#[derive(Debug, Clone, Copy)]
enum Resolution {
    Move,
    Capture(PieceId),
    Reject(Rejection),
}

impl<A: Adjudicator + Default> Game<A> {
    /// An empty 8x8 game. The board appears with the first placement.
    pub fn new() -> Self {
        Self::with_adjudicator(A::default())
    }

    pub fn with_dimensions(ranks: u8, files: u8) -> Self {
        Self::with_board(ranks, files, A::default())
    }

    /// The opening layout: White on ranks 0 and 1, Black on ranks 6 and 7,
    /// every piece starting with no known type.
    pub fn standard() -> Result<Self, GameError> {
        let mut game = Self::new();
        for (color, ranks) in [(PieceColor::White, [0, 1]), (PieceColor::Black, [6, 7])] {
            for rank in ranks {
                for file in 0..DEFAULT_FILES {
                    game.add_piece(color, Square::new(rank, file))?;
                }
            }
        }
        debug!(pieces = game.pieces.len(), "standard layout placed");
        Ok(game)
    }
}

impl<A: Adjudicator + Default> Default for Game<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Adjudicator> Game<A> {
    pub fn with_adjudicator(adjudicator: A) -> Self {
        Self::with_board(DEFAULT_RANKS, DEFAULT_FILES, adjudicator)
    }

    /// An empty `ranks` x `files` game gated by `adjudicator`.
    pub fn with_board(ranks: u8, files: u8, adjudicator: A) -> Self {
        Self {
            pieces: Vec::new(),
            history: BoardHistory::with_dimensions(ranks, files),
            adjudicator,
        }
    }

    /// Create a piece of `color` with the full candidate set. It is not on
    /// the board until [`place_piece`](Self::place_piece) puts it there.
    pub fn spawn_piece(&mut self, color: PieceColor) -> PieceId {
        let id = PieceId::from_index(self.pieces.len());
        self.pieces.push(Piece::new(id, color));
        id
    }

    /// Put a piece on the board without any validation. Setup only: once a
    /// move has been recorded this fails with [`GameError::SetupClosed`].
    pub fn place_piece(&mut self, id: PieceId, square: Square) -> Result<(), GameError> {
        self.piece(id)?;
        self.history.add_piece_to_board(id, square)?;
        trace!(piece = %id, %square, "piece placed");
        Ok(())
    }

    /// Spawn a piece and place it in one step.
    pub fn add_piece(&mut self, color: PieceColor, square: Square) -> Result<PieceId, GameError> {
        let id = self.spawn_piece(color);
        if let Err(err) = self.place_piece(id, square) {
            self.pieces.pop();
            return Err(err);
        }
        Ok(id)
    }

    pub fn piece(&self, id: PieceId) -> Result<&Piece, GameError> {
        self.pieces.get(id.index()).ok_or(GameError::UnknownPiece(id))
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The current board state.
    pub fn board(&self) -> Result<&BoardState, GameError> {
        self.history.current().ok_or(GameError::EmptyHistory)
    }

    pub fn history(&self) -> &BoardHistory {
        &self.history
    }

    pub fn turn(&self) -> Turn {
        self.adjudicator.turn()
    }

    /// Try to play `id` from `from` to `to`.
    ///
    /// Rule rejections come back as [`MoveOutcome::Rejected`] and leave the
    /// game untouched. Errors are reserved for contract violations: squares
    /// off the board, an unknown piece, or a piece that is not on `from`.
    #[tracing::instrument(level = "debug", skip_all, fields(piece = %id, from = %from, to = %to))]
    pub fn attempt_move(
        &mut self,
        id: PieceId,
        from: Square,
        to: Square,
    ) -> Result<MoveOutcome, GameError> {
        let resolution = self.resolve(id, from, to)?;

        let candidates = match resolution {
            Resolution::Reject(reason) => {
                debug!(%reason, "move rejected");
                return Ok(MoveOutcome::Rejected { reason });
            }
            Resolution::Move => self.piece(id)?.candidates().narrowed_to_move(from, to),
            Resolution::Capture(_) => self.piece(id)?.candidates().narrowed_to_capture(from, to),
        };
        if candidates.is_empty() {
            return Err(GameError::CandidatesExhausted(id));
        }

        let outcome = match resolution {
            Resolution::Capture(captured) => {
                self.history.capture_piece(from, to)?;
                MoveOutcome::Captured { captured }
            }
            _ => {
                self.history.move_piece(from, to)?;
                MoveOutcome::Moved
            }
        };
        self.commit(id, candidates);

        info!(
            capture = outcome.is_capture(),
            snapshots = self.history.len(),
            "move accepted"
        );
        Ok(outcome)
    }

    /// Runs every check in order without touching any state.
    fn resolve(&self, id: PieceId, from: Square, to: Square) -> Result<Resolution, GameError> {
        let board = self.board()?;
        board.check_bounds(from)?;
        board.check_bounds(to)?;
        let piece = self.piece(id)?;
        if board.get_maybe_piece(from)? != Some(id) {
            return Err(GameError::PieceNotAt {
                piece: id,
                square: from,
            });
        }

        if from == to {
            return Ok(Resolution::Reject(Rejection::SameSquare));
        }
        if board.piece_between(from, to)? {
            return Ok(Resolution::Reject(Rejection::Obstructed));
        }

        let resolution = match board.get_maybe_piece(to)? {
            Some(target) => {
                if self.piece(target)?.color() == piece.color() {
                    return Ok(Resolution::Reject(Rejection::OwnPiece));
                }
                if !piece.candidates().can_capture(from, to) {
                    return Ok(Resolution::Reject(Rejection::IllegalCapture));
                }
                Resolution::Capture(target)
            }
            None => {
                if !piece.candidates().can_move(from, to) {
                    return Ok(Resolution::Reject(Rejection::IllegalMove));
                }
                Resolution::Move
            }
        };

        if !self.adjudicator.validate_move(piece, from, to) {
            return Ok(Resolution::Reject(Rejection::WrongTurn));
        }
        Ok(resolution)
    }

    /// Applies the post-move piece and turn updates. The board snapshot has
    /// already been appended.
    fn commit(&mut self, id: PieceId, candidates: CandidateSet) {
        let piece = &mut self.pieces[id.index()];
        piece.set_candidates(candidates);
        trace!(piece = %id, remaining = piece.candidates().len(), "candidates narrowed");

        self.adjudicator.end_turn();
        info!(turn = %self.adjudicator.turn(), "turn ended");
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("board error: {0}")]
    Board(#[from] BoardError),
    #[error("no board yet: place a piece first")]
    EmptyHistory,
    #[error("unknown piece {0}")]
    UnknownPiece(PieceId),
    #[error("piece {piece} is not on square {square}")]
    PieceNotAt { piece: PieceId, square: Square },
    #[error("piece {0} has no candidate rule left")]
    CandidatesExhausted(PieceId),
    #[error("pieces can only be placed before the first move")]
    SetupClosed,
}

impl From<HistoryError> for GameError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::Empty => Self::EmptyHistory,
            HistoryError::SetupClosed { .. } => Self::SetupClosed,
            HistoryError::Board(err) => Self::Board(err),
        }
    }
}
