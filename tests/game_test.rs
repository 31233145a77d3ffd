//! Tests for the game engine: legality filtering, turn order, terminal
//! detection, and snapshot round-trips.

use chesshub::chess::{
    Board, Color, Game, GameStatus, Move, MoveError, Piece, PieceKind, Position,
};

fn pos(row: i8, col: i8) -> Position {
    Position::new(row, col).unwrap()
}

fn mv(from: (i8, i8), to: (i8, i8)) -> Move {
    Move::new(pos(from.0, from.1), pos(to.0, to.1))
}

/// Plays the scholar's mate sequence: 1.e4 e5 2.Bc4 Nc6 3.Qh5 Nf6 4.Qxf7#.
fn play_scholars_mate(game: &mut Game) {
    let sequence = [
        ((2, 5), (4, 5)), // e4
        ((7, 5), (5, 5)), // e5
        ((1, 6), (4, 3)), // Bc4
        ((8, 2), (6, 3)), // Nc6
        ((1, 4), (5, 8)), // Qh5
        ((8, 7), (6, 6)), // Nf6
        ((5, 8), (7, 6)), // Qxf7#
    ];
    for (from, to) in sequence {
        game.apply_move(mv(from, to)).unwrap();
    }
}

#[test]
fn test_new_game_is_standard_start_white_to_move() {
    let game = Game::new();
    assert_eq!(game.to_move(), Color::White);
    assert!(!game.is_over());
    assert_eq!(game.board().pieces().count(), 32);
}

#[test]
fn test_legal_moves_none_for_empty_square() {
    let game = Game::new();
    // Distinct from a piece with zero legal moves.
    assert!(game.legal_moves(pos(4, 4)).is_none());
}

#[test]
fn test_white_has_twenty_opening_moves() {
    let game = Game::new();
    let total: usize = game
        .board()
        .pieces()
        .filter(|(_, piece)| piece.color == Color::White)
        .map(|(square, _)| game.legal_moves(square).unwrap().len())
        .sum();
    assert_eq!(total, 20);
}

#[test]
fn test_apply_move_flips_turn_and_moves_piece() {
    let mut game = Game::new();
    game.apply_move(mv((2, 5), (4, 5))).unwrap();

    assert_eq!(game.to_move(), Color::Black);
    assert_eq!(game.board().get(pos(2, 5)), None);
    assert_eq!(
        game.board().get(pos(4, 5)),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
}

#[test]
fn test_apply_move_rejects_empty_start() {
    let mut game = Game::new();
    let err = game.apply_move(mv((4, 4), (5, 4))).unwrap_err();
    assert!(matches!(err, MoveError::NoPiece { .. }));
}

#[test]
fn test_apply_move_rejects_wrong_turn() {
    let mut game = Game::new();
    let err = game.apply_move(mv((7, 5), (5, 5))).unwrap_err();
    assert!(matches!(err, MoveError::OutOfTurn { color: Color::White }));
}

#[test]
fn test_apply_move_rejects_non_member_move() {
    let mut game = Game::new();
    // A pawn cannot advance three squares.
    let err = game.apply_move(mv((2, 5), (5, 5))).unwrap_err();
    assert!(matches!(err, MoveError::NotLegal { .. }));
}

#[test]
fn test_no_legal_move_ever_leaves_own_king_attacked() {
    // From a handful of positions along the scholar's mate line, simulate
    // every legal move for the side on move and verify the king is safe
    // on the resulting board.
    let mut game = Game::new();
    let sequence = [
        ((2, 5), (4, 5)),
        ((7, 5), (5, 5)),
        ((1, 6), (4, 3)),
        ((8, 2), (6, 3)),
        ((1, 4), (5, 8)),
        ((8, 7), (6, 6)),
    ];
    for (from, to) in sequence {
        let mover = game.to_move();
        let squares: Vec<_> = game
            .board()
            .pieces()
            .filter(|(_, piece)| piece.color == mover)
            .map(|(square, _)| square)
            .collect();
        for square in squares {
            for legal in game.legal_moves(square).unwrap() {
                let mut probe = game.clone();
                probe.apply_move(legal).unwrap();
                assert!(
                    !probe.is_in_check(mover),
                    "move {legal} left {mover}'s king attacked"
                );
            }
        }
        game.apply_move(mv(from, to)).unwrap();
    }
}

#[test]
fn test_pinned_piece_has_restricted_moves() {
    let mut board = Board::new();
    board.place(pos(1, 5), Piece::new(Color::White, PieceKind::King));
    board.place(pos(2, 5), Piece::new(Color::White, PieceKind::Rook));
    board.place(pos(8, 5), Piece::new(Color::Black, PieceKind::Rook));
    board.place(pos(8, 1), Piece::new(Color::Black, PieceKind::King));

    let game = Game::from_parts(board, Color::White);
    let moves = game.legal_moves(pos(2, 5)).unwrap();

    // The rook may slide along the pin file, up to capturing the pinner,
    // but never sideways.
    assert_eq!(moves.len(), 6);
    for legal in &moves {
        assert_eq!(legal.end.col(), 5);
    }
}

#[test]
fn test_fully_pinned_piece_has_zero_moves() {
    let mut board = Board::new();
    board.place(pos(1, 5), Piece::new(Color::White, PieceKind::King));
    board.place(pos(2, 6), Piece::new(Color::White, PieceKind::Knight));
    board.place(pos(3, 7), Piece::new(Color::Black, PieceKind::Bishop));
    board.place(pos(8, 1), Piece::new(Color::Black, PieceKind::King));

    let game = Game::from_parts(board, Color::White);
    // The knight shields the king from the bishop; any knight move
    // exposes the diagonal.
    assert_eq!(game.legal_moves(pos(2, 6)).unwrap().len(), 0);
}

#[test]
fn test_scholars_mate_is_checkmate() {
    let mut game = Game::new();
    play_scholars_mate(&mut game);

    assert!(game.is_in_checkmate(Color::Black));
    assert!(!game.is_in_stalemate(Color::Black));
    assert!(game.is_in_check(Color::Black));
    assert_eq!(game.state().status(), GameStatus::Over);
}

#[test]
fn test_no_moves_accepted_after_checkmate() {
    let mut game = Game::new();
    play_scholars_mate(&mut game);

    let err = game.apply_move(mv((8, 5), (7, 5))).unwrap_err();
    assert!(matches!(err, MoveError::GameOver));
}

#[test]
fn test_constructed_stalemate() {
    // Black king cornered on a8 by a white queen on c7: not in check,
    // but every escape square is covered.
    let mut board = Board::new();
    board.place(pos(8, 1), Piece::new(Color::Black, PieceKind::King));
    board.place(pos(7, 3), Piece::new(Color::White, PieceKind::Queen));
    board.place(pos(1, 5), Piece::new(Color::White, PieceKind::King));

    let game = Game::from_parts(board, Color::Black);

    assert!(game.is_in_stalemate(Color::Black));
    assert!(!game.is_in_checkmate(Color::Black));
    assert!(!game.is_in_check(Color::Black));
    assert_eq!(game.state().status(), GameStatus::Over);
}

#[test]
fn test_missing_king_means_not_in_check() {
    let mut board = Board::new();
    board.place(pos(4, 4), Piece::new(Color::White, PieceKind::Rook));
    let game = Game::from_parts(board, Color::Black);

    assert!(!game.is_in_check(Color::Black));
    assert!(!game.is_in_checkmate(Color::Black));
}

#[test]
fn test_promotion_places_chosen_piece() {
    let mut board = Board::new();
    board.place(pos(7, 1), Piece::new(Color::White, PieceKind::Pawn));
    board.place(pos(1, 5), Piece::new(Color::White, PieceKind::King));
    board.place(pos(8, 8), Piece::new(Color::Black, PieceKind::King));

    let mut game = Game::from_parts(board, Color::White);
    game.apply_move(Move::promoting(pos(7, 1), pos(8, 1), PieceKind::Queen))
        .unwrap();

    assert_eq!(
        game.board().get(pos(8, 1)),
        Some(Piece::new(Color::White, PieceKind::Queen))
    );
}

#[test]
fn test_bare_move_to_far_rank_is_rejected() {
    let mut board = Board::new();
    board.place(pos(7, 1), Piece::new(Color::White, PieceKind::Pawn));
    board.place(pos(1, 5), Piece::new(Color::White, PieceKind::King));
    board.place(pos(8, 8), Piece::new(Color::Black, PieceKind::King));

    let mut game = Game::from_parts(board, Color::White);
    // A far-rank landing without a promotion choice is not a member of
    // the legal set.
    let err = game.apply_move(mv((7, 1), (8, 1))).unwrap_err();
    assert!(matches!(err, MoveError::NotLegal { .. }));
}

#[test]
fn test_resign_ends_game_without_touching_board() {
    let mut game = Game::new();
    game.resign();

    assert!(game.is_over());
    assert_eq!(game.board().pieces().count(), 32);
    assert!(matches!(
        game.apply_move(mv((2, 5), (4, 5))),
        Err(MoveError::GameOver)
    ));
}

#[test]
fn test_state_round_trips_through_json() {
    let mut game = Game::new();
    game.apply_move(mv((2, 5), (4, 5))).unwrap();
    game.apply_move(mv((7, 5), (5, 5))).unwrap();

    let json = serde_json::to_string(game.state()).unwrap();
    let restored: chesshub::chess::GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(game.state(), &restored);
}

#[test]
fn test_restored_state_continues_play() {
    let mut game = Game::new();
    game.apply_move(mv((2, 5), (4, 5))).unwrap();

    let json = serde_json::to_string(game.state()).unwrap();
    let restored: chesshub::chess::GameState = serde_json::from_str(&json).unwrap();
    let mut resumed = Game::from_state(restored);

    assert_eq!(resumed.to_move(), Color::Black);
    resumed.apply_move(mv((7, 5), (5, 5))).unwrap();
}
