//! Scripted move attempts.
//!
//! A script is a JSON array of `{ "from": {..}, "to": {..} }` steps. Each
//! step moves whatever piece stands on `from`; the engine decides whether
//! the move stands. Contract violations are reported per step and do not
//! stop the replay.

use std::io::Read;
use std::path::Path;

use chess::{Game, GameError, MoveOutcome, PieceColor, PieceId, PieceKind, Square, Turn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Step {
    pub from: Square,
    pub to: Square,
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub from: Square,
    pub to: Square,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<MoveOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Side to move after this step.
    pub turn: Turn,
}

#[derive(Debug, Serialize)]
pub struct PieceSummary {
    pub id: PieceId,
    pub color: PieceColor,
    pub candidates: Vec<PieceKind>,
}

#[derive(Debug, Serialize)]
pub struct PlacedPiece {
    pub square: Square,
    #[serde(flatten)]
    pub piece: PieceSummary,
}

/// What a front end would need to draw the current position.
#[derive(Debug, Serialize)]
pub struct Position {
    pub turn: Turn,
    pub snapshots: usize,
    pub pieces: Vec<PlacedPiece>,
    pub captured: Vec<PieceSummary>,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    pub position: Position,
}

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("engine error: {0}")]
    Game(#[from] GameError),
}

pub fn load_script(reader: impl Read) -> Result<Vec<Step>, ReplayError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_script_file(path: &Path) -> Result<Vec<Step>, ReplayError> {
    let file = std::fs::File::open(path).map_err(|source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_script(std::io::BufReader::new(file))
}

/// Play every step against `game` and report what happened.
pub fn run(game: &mut Game, steps: &[Step]) -> Result<ReplayReport, ReplayError> {
    let mut reports = Vec::with_capacity(steps.len());

    for (index, step) in steps.iter().enumerate() {
        let (outcome, error) = match attempt(game, step) {
            Ok(outcome) => (Some(outcome), None),
            Err(err) => {
                tracing::warn!(step = index, error = %err, "step failed");
                (None, Some(err.to_string()))
            }
        };
        reports.push(StepReport {
            step: index,
            from: step.from,
            to: step.to,
            outcome,
            error,
            turn: game.turn(),
        });
    }

    let accepted = reports
        .iter()
        .filter(|r| r.outcome.is_some_and(|o| o.is_accepted()))
        .count();
    tracing::info!(steps = steps.len(), accepted, "replay finished");

    Ok(ReplayReport {
        steps: reports,
        position: Position::from_game(game)?,
    })
}

fn attempt(game: &mut Game, step: &Step) -> Result<MoveOutcome, GameError> {
    let id = game.board()?.get_piece(step.from)?;
    game.attempt_move(id, step.from, step.to)
}

impl PieceSummary {
    fn from_game(game: &Game, id: PieceId) -> Result<Self, GameError> {
        let piece = game.piece(id)?;
        Ok(Self {
            id,
            color: piece.color(),
            candidates: piece.candidates().kinds().collect(),
        })
    }
}

impl Position {
    pub fn from_game(game: &Game) -> Result<Self, GameError> {
        let board = game.board()?;
        let pieces = board
            .pieces()
            .map(|(square, id)| {
                Ok(PlacedPiece {
                    square,
                    piece: PieceSummary::from_game(game, id)?,
                })
            })
            .collect::<Result<Vec<_>, GameError>>()?;
        let captured = board
            .captured()
            .iter()
            .map(|&id| PieceSummary::from_game(game, id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            turn: game.turn(),
            snapshots: game.history().len(),
            pieces,
            captured,
        })
    }
}
