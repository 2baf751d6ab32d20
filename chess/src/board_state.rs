//! Board snapshots.
//!
//! A [`BoardState`] is a grid of [`Occupant`]s plus the pieces captured so
//! far. The pure operations (`move_piece`, `capture_piece`) return a new
//! state and leave `self` untouched, which is what the history stores.

use chess_common::Square;

use crate::occupant::Occupant;
use crate::piece::PieceId;

pub const DEFAULT_RANKS: u8 = 8;
pub const DEFAULT_FILES: u8 = 8;

/// Grid of occupants, rank-major, plus the captured list.
///
/// `Clone` is the snapshot copy: the grid and captured list are independent,
/// the piece handles inside them are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    ranks: u8,
    files: u8,
    cells: Vec<Occupant>,
    captured: Vec<PieceId>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// An empty 8x8 board.
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_RANKS, DEFAULT_FILES)
    }

    pub fn with_dimensions(ranks: u8, files: u8) -> Self {
        Self {
            ranks,
            files,
            cells: vec![Occupant::Empty; usize::from(ranks) * usize::from(files)],
            captured: Vec::new(),
        }
    }

    pub fn ranks(&self) -> u8 {
        self.ranks
    }

    pub fn files(&self) -> u8 {
        self.files
    }

    /// Pieces captured so far, oldest first.
    pub fn captured(&self) -> &[PieceId] {
        &self.captured
    }

    pub fn contains(&self, square: Square) -> bool {
        square.rank < self.ranks && square.file < self.files
    }

    pub fn check_bounds(&self, square: Square) -> Result<(), BoardError> {
        if self.contains(square) {
            Ok(())
        } else {
            Err(BoardError::OutOfRange {
                square,
                ranks: self.ranks,
                files: self.files,
            })
        }
    }

    fn index(&self, square: Square) -> Result<usize, BoardError> {
        self.check_bounds(square)?;
        Ok(self.offset(square.rank, square.file))
    }

    fn offset(&self, rank: u8, file: u8) -> usize {
        usize::from(rank) * usize::from(self.files) + usize::from(file)
    }

    /// Occupancy of a square already known to be in range.
    fn occupied(&self, rank: u8, file: u8) -> bool {
        self.cells[self.offset(rank, file)].has_piece()
    }

    /// Every occupied square with its piece, rank by rank.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, PieceId)> + '_ {
        let files = usize::from(self.files.max(1));
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.maybe_piece()
                .map(|id| (Square::new((i / files) as u8, (i % files) as u8), id))
        })
    }

    /* Queries */

    pub fn piece_at(&self, square: Square) -> Result<bool, BoardError> {
        Ok(self.cells[self.index(square)?].has_piece())
    }

    /// The piece on `square`. An empty square is an error; use
    /// [`get_maybe_piece`](Self::get_maybe_piece) when emptiness is expected.
    pub fn get_piece(&self, square: Square) -> Result<PieceId, BoardError> {
        self.get_maybe_piece(square)?
            .ok_or(BoardError::NoPiece { square })
    }

    pub fn get_maybe_piece(&self, square: Square) -> Result<Option<PieceId>, BoardError> {
        Ok(self.cells[self.index(square)?].maybe_piece())
    }

    /// Whether a piece stands strictly between `start` and `end`.
    ///
    /// Only rank, file and diagonal lines are walked; any other pair (and a
    /// pair of identical squares) reports no obstruction. The diagonal walk
    /// starts from the lower rank and the lower file of the two endpoints
    /// and steps both up together.
    pub fn piece_between(&self, start: Square, end: Square) -> Result<bool, BoardError> {
        self.check_bounds(start)?;
        self.check_bounds(end)?;

        if start == end {
            return Ok(false);
        }

        if start.rank == end.rank {
            let (low, high) = ordered(start.file, end.file);
            return Ok((low + 1..high).any(|file| self.occupied(start.rank, file)));
        }

        if start.file == end.file {
            let (low, high) = ordered(start.rank, end.rank);
            return Ok((low + 1..high).any(|rank| self.occupied(rank, start.file)));
        }

        let rank_delta = start.rank.abs_diff(end.rank);
        let file_delta = start.file.abs_diff(end.file);
        if rank_delta == file_delta {
            let low_rank = start.rank.min(end.rank);
            let low_file = start.file.min(end.file);
            return Ok((1..file_delta)
                .any(|offset| self.occupied(low_rank + offset, low_file + offset)));
        }

        Ok(false)
    }

    /* Setup */

    /// Puts `piece` on `square`, overwriting whatever was there.
    pub fn set_piece_in_place(&mut self, piece: PieceId, square: Square) -> Result<(), BoardError> {
        let index = self.index(square)?;
        self.cells[index] = Occupant::Occupied(piece);
        Ok(())
    }

    /* Snapshot operations */

    /// A new state with the occupant of `from` moved onto `to`.
    ///
    /// The destination is overwritten whether or not it was occupied and the
    /// source is left empty. An empty source simply empties `to`.
    pub fn move_piece(&self, from: Square, to: Square) -> Result<BoardState, BoardError> {
        let mut next = self.clone();
        next.move_piece_in_place(from, to)?;
        Ok(next)
    }

    /// A new state where the occupant of `from` captures the piece on `to`.
    ///
    /// Fails with [`BoardError::NoPiece`] if `to` is empty.
    pub fn capture_piece(&self, from: Square, to: Square) -> Result<BoardState, BoardError> {
        let mut next = self.clone();
        next.capture_piece_in_place(from, to)?;
        Ok(next)
    }

    pub fn move_piece_in_place(&mut self, from: Square, to: Square) -> Result<(), BoardError> {
        let source = self.index(from)?;
        let target = self.index(to)?;
        let occupant = std::mem::take(&mut self.cells[source]);
        self.cells[target] = occupant;
        Ok(())
    }

    pub fn capture_piece_in_place(&mut self, from: Square, to: Square) -> Result<(), BoardError> {
        let source = self.index(from)?;
        let victim = self.get_piece(to)?;
        self.captured.push(victim);
        let target = self.index(to)?;
        let occupant = std::mem::take(&mut self.cells[source]);
        self.cells[target] = occupant;
        Ok(())
    }
}

fn ordered(a: u8, b: u8) -> (u8, u8) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Contract violations: the caller asked about a square it should have
/// validated first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("square {square} is outside the {ranks}x{files} board")]
    OutOfRange { square: Square, ranks: u8, files: u8 },
    #[error("no piece on square {square}")]
    NoPiece { square: Square },
}
