use chess::{
    Game, GameError, MoveOutcome, PieceColor, PieceId, PieceKind, Rejection, Square, Turn,
};
use proptest::prelude::*;

fn sq(rank: u8, file: u8) -> Square {
    Square::new(rank, file)
}

fn kinds(game: &Game, id: PieceId) -> Vec<PieceKind> {
    let mut kinds: Vec<_> = game.piece(id).unwrap().candidates().kinds().collect();
    kinds.sort();
    kinds
}

fn piece_on(game: &Game, square: Square) -> PieceId {
    game.board().unwrap().get_piece(square).unwrap()
}

#[test]
fn test_knight_jump_resolves_identity() {
    let mut game: Game = Game::new();
    let knight = game.add_piece(PieceColor::White, sq(0, 1)).unwrap();
    let before = game.history().len();

    let outcome = game.attempt_move(knight, sq(0, 1), sq(2, 2)).unwrap();

    assert_eq!(outcome, MoveOutcome::Moved);
    assert!(outcome.is_accepted());
    assert_eq!(kinds(&game, knight), vec![PieceKind::Knight]);
    assert_eq!(game.history().len(), before + 1);
    assert_eq!(game.turn(), Turn::BlackToMove);
    assert_eq!(piece_on(&game, sq(2, 2)), knight);
    assert!(!game.board().unwrap().piece_at(sq(0, 1)).unwrap());
}

#[test]
fn test_pawn_style_capture() {
    let mut game: Game = Game::new();
    let white = game.add_piece(PieceColor::White, sq(1, 3)).unwrap();
    let black = game.add_piece(PieceColor::Black, sq(2, 4)).unwrap();
    let before = game.history().len();

    let outcome = game.attempt_move(white, sq(1, 3), sq(2, 4)).unwrap();

    assert_eq!(outcome, MoveOutcome::Captured { captured: black });
    assert!(outcome.is_capture());
    assert_eq!(game.history().len(), before + 1);

    let board = game.board().unwrap();
    assert_eq!(board.captured(), &[black]);
    assert_eq!(board.get_piece(sq(2, 4)), Ok(white));
    assert!(!board.piece_at(sq(1, 3)).unwrap());

    // The previous snapshot still shows the position before the capture.
    let previous = game.history().get(before - 1).unwrap();
    assert_eq!(previous.get_piece(sq(2, 4)), Ok(black));
    assert!(previous.captured().is_empty());

    assert_eq!(
        kinds(&game, white),
        vec![PieceKind::Pawn, PieceKind::Bishop, PieceKind::Queen]
    );
}

#[test]
fn test_landing_on_own_piece_changes_nothing() {
    let mut game: Game = Game::new();
    let mover = game.add_piece(PieceColor::White, sq(0, 0)).unwrap();
    let friend = game.add_piece(PieceColor::White, sq(0, 1)).unwrap();
    let board_before = game.board().unwrap().clone();
    let len_before = game.history().len();

    let outcome = game.attempt_move(mover, sq(0, 0), sq(0, 1)).unwrap();

    assert_eq!(
        outcome,
        MoveOutcome::Rejected {
            reason: Rejection::OwnPiece
        }
    );
    assert!(!outcome.is_accepted());
    assert!(!outcome.is_capture());
    assert_eq!(game.history().len(), len_before);
    assert_eq!(game.board().unwrap(), &board_before);
    assert_eq!(game.turn(), Turn::WhiteToMove);
    assert_eq!(game.piece(mover).unwrap().candidates().len(), 5);
    assert_eq!(piece_on(&game, sq(0, 1)), friend);
}

#[test]
fn test_turns_alternate() {
    let mut game: Game = Game::standard().unwrap();
    let white = piece_on(&game, sq(0, 1));
    let black = piece_on(&game, sq(7, 1));

    // Black may not open.
    let outcome = game.attempt_move(black, sq(7, 1), sq(5, 2)).unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::WrongTurn));

    assert!(game
        .attempt_move(white, sq(0, 1), sq(2, 2))
        .unwrap()
        .is_accepted());

    // White may not move twice.
    let outcome = game.attempt_move(white, sq(2, 2), sq(4, 3)).unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::WrongTurn));

    assert!(game
        .attempt_move(black, sq(7, 1), sq(5, 2))
        .unwrap()
        .is_accepted());
    assert_eq!(game.turn(), Turn::WhiteToMove);
    assert_eq!(game.history().len(), 3);
}

#[test]
fn test_standard_back_rank_is_blocked() {
    let mut game: Game = Game::standard().unwrap();
    let corner = piece_on(&game, sq(0, 0));
    let outcome = game.attempt_move(corner, sq(0, 0), sq(3, 0)).unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::Obstructed));
    assert_eq!(game.history().len(), 1);
}

#[test]
fn test_opening_exchange_narrows_both_sides() {
    let mut game: Game = Game::standard().unwrap();
    let white = piece_on(&game, sq(1, 4));
    let black = piece_on(&game, sq(6, 3));

    assert_eq!(
        game.attempt_move(white, sq(1, 4), sq(3, 4)).unwrap(),
        MoveOutcome::Moved
    );
    assert_eq!(
        kinds(&game, white),
        vec![PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen]
    );

    assert_eq!(
        game.attempt_move(black, sq(6, 3), sq(4, 3)).unwrap(),
        MoveOutcome::Moved
    );

    let outcome = game.attempt_move(white, sq(3, 4), sq(4, 3)).unwrap();
    assert_eq!(outcome, MoveOutcome::Captured { captured: black });
    assert_eq!(kinds(&game, white), vec![PieceKind::Pawn, PieceKind::Queen]);
    assert_eq!(game.board().unwrap().captured(), &[black]);
    assert_eq!(game.history().len(), 4);
}

#[test]
fn test_pawn_loses_double_step_after_moving() {
    let mut game: Game = Game::new();
    let white = game.add_piece(PieceColor::White, sq(1, 2)).unwrap();
    let black = game.add_piece(PieceColor::Black, sq(7, 7)).unwrap();

    assert!(game
        .attempt_move(white, sq(1, 2), sq(2, 2))
        .unwrap()
        .is_accepted());
    assert!(game
        .attempt_move(black, sq(7, 7), sq(7, 6))
        .unwrap()
        .is_accepted());

    // Still legal for a rook or queen, but no longer for a pawn.
    assert!(game
        .attempt_move(white, sq(2, 2), sq(4, 2))
        .unwrap()
        .is_accepted());
    assert_eq!(kinds(&game, white), vec![PieceKind::Rook, PieceKind::Queen]);
}

#[test]
fn test_capture_keeps_pawn_double_step() {
    let mut game: Game = Game::new();
    let white = game.add_piece(PieceColor::White, sq(1, 3)).unwrap();
    let black = game.add_piece(PieceColor::Black, sq(2, 4)).unwrap();
    let other = game.add_piece(PieceColor::Black, sq(7, 7)).unwrap();

    assert_eq!(
        game.attempt_move(white, sq(1, 3), sq(2, 4)).unwrap(),
        MoveOutcome::Captured { captured: black }
    );
    assert!(game
        .attempt_move(other, sq(7, 7), sq(7, 6))
        .unwrap()
        .is_accepted());

    // A pawn that has only captured may still advance two squares.
    assert_eq!(
        game.attempt_move(white, sq(2, 4), sq(4, 4)).unwrap(),
        MoveOutcome::Moved
    );
    assert_eq!(kinds(&game, white), vec![PieceKind::Pawn, PieceKind::Queen]);
}

#[test]
fn test_rejected_move_keeps_pawn_first_move() {
    let mut game: Game = Game::new();
    let white = game.add_piece(PieceColor::White, sq(1, 2)).unwrap();
    let black = game.add_piece(PieceColor::Black, sq(6, 2)).unwrap();

    // Valid pawn geometry for Black, but White is to move.
    let outcome = game.attempt_move(black, sq(6, 2), sq(5, 2)).unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::WrongTurn));

    game.attempt_move(white, sq(1, 2), sq(1, 3)).unwrap();
    // The earlier rejection must not have spent Black's double step.
    game.attempt_move(black, sq(6, 2), sq(4, 2)).unwrap();
    assert!(kinds(&game, black).contains(&PieceKind::Pawn));
}

#[test]
fn test_snapshots_share_piece_handles() {
    let mut game: Game = Game::standard().unwrap();
    let knight = piece_on(&game, sq(0, 6));
    game.attempt_move(knight, sq(0, 6), sq(2, 5)).unwrap();

    let first = game.history().get(0).unwrap();
    let current = game.history().current().unwrap();
    assert_eq!(first.get_piece(sq(0, 6)), current.get_piece(sq(2, 5)));
    assert!(!current.piece_at(sq(0, 6)).unwrap());
}

#[test]
fn test_contract_violations_are_errors() {
    let mut game: Game = Game::standard().unwrap();
    let white = piece_on(&game, sq(1, 0));

    assert!(matches!(
        game.attempt_move(white, sq(1, 0), sq(1, 8)),
        Err(GameError::Board(_))
    ));
    assert_eq!(
        game.attempt_move(white, sq(2, 0), sq(3, 0)),
        Err(GameError::PieceNotAt {
            piece: white,
            square: sq(2, 0)
        })
    );
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.turn(), Turn::WhiteToMove);
}

#[test]
fn test_custom_board_dimensions() {
    let mut game: Game = Game::with_dimensions(4, 4);
    let white = game.add_piece(PieceColor::White, sq(0, 0)).unwrap();
    assert!(game.add_piece(PieceColor::Black, sq(4, 0)).is_err());

    assert!(game
        .attempt_move(white, sq(0, 0), sq(3, 3))
        .unwrap()
        .is_accepted());
    assert!(game.attempt_move(white, sq(3, 3), sq(5, 3)).is_err());
}

fn any_square() -> impl Strategy<Value = Square> {
    (0u8..8, 0u8..8).prop_map(|(rank, file)| Square::new(rank, file))
}

proptest! {
    #[test]
    fn attempts_commit_all_or_nothing(
        attempts in proptest::collection::vec((any_square(), any_square()), 1..40)
    ) {
        let mut game: Game = Game::standard().unwrap();

        for (from, to) in attempts {
            let Some(id) = game.board().unwrap().get_maybe_piece(from).unwrap() else {
                continue;
            };
            let board_before = game.board().unwrap().clone();
            let len_before = game.history().len();
            let turn_before = game.turn();
            let candidates_before = game.piece(id).unwrap().candidates().clone();

            let outcome = game.attempt_move(id, from, to).unwrap();
            let candidates_after = game.piece(id).unwrap().candidates().clone();

            if outcome.is_accepted() {
                prop_assert_eq!(game.history().len(), len_before + 1);
                prop_assert_eq!(game.turn(), turn_before.next());
                prop_assert_eq!(game.piece(id).unwrap().color(), turn_before.color());
                prop_assert!(!candidates_after.is_empty());
                prop_assert!(candidates_after.len() <= candidates_before.len());
                prop_assert!(candidates_after.kinds().all(|k| candidates_before.contains(k)));
                prop_assert_eq!(game.board().unwrap().get_piece(to), Ok(id));
            } else {
                prop_assert_eq!(game.history().len(), len_before);
                prop_assert_eq!(game.turn(), turn_before);
                prop_assert_eq!(game.board().unwrap(), &board_before);
                prop_assert_eq!(candidates_after, candidates_before);
            }
        }
    }
}
