//! Tests for pseudo-legal move generation, piece kind by piece kind.

use strum::IntoEnumIterator;

use chesshub::chess::movegen::pseudo_legal_moves;
use chesshub::chess::{Board, Color, Move, Piece, PieceKind, Position, PROMOTION_CHOICES};

fn pos(row: i8, col: i8) -> Position {
    Position::new(row, col).unwrap()
}

fn ends(moves: &[Move]) -> Vec<Position> {
    moves.iter().map(|mv| mv.end).collect()
}

#[test]
fn test_empty_square_generates_nothing() {
    let board = Board::new();
    assert!(pseudo_legal_moves(&board, pos(4, 4)).is_empty());
}

#[test]
fn test_king_moves_all_eight_directions() {
    let mut board = Board::new();
    board.place(pos(4, 4), Piece::new(Color::White, PieceKind::King));
    let moves = pseudo_legal_moves(&board, pos(4, 4));
    assert_eq!(moves.len(), 8);
}

#[test]
fn test_king_in_corner_discards_off_board() {
    let mut board = Board::new();
    board.place(pos(1, 1), Piece::new(Color::White, PieceKind::King));
    let moves = pseudo_legal_moves(&board, pos(1, 1));
    assert_eq!(moves.len(), 3);
}

#[test]
fn test_knight_jumps_from_corner() {
    let mut board = Board::new();
    board.place(pos(1, 1), Piece::new(Color::Black, PieceKind::Knight));
    let moves = pseudo_legal_moves(&board, pos(1, 1));
    let destinations = ends(&moves);
    assert_eq!(moves.len(), 2);
    assert!(destinations.contains(&pos(3, 2)));
    assert!(destinations.contains(&pos(2, 3)));
}

#[test]
fn test_knight_ignores_intervening_pieces() {
    let mut board = Board::new();
    board.place(pos(4, 4), Piece::new(Color::White, PieceKind::Knight));
    // Surround the knight completely; it jumps regardless.
    for d_row in -1..=1 {
        for d_col in -1..=1 {
            if d_row == 0 && d_col == 0 {
                continue;
            }
            if let Some(square) = pos(4, 4).offset(d_row, d_col) {
                board.place(square, Piece::new(Color::White, PieceKind::Pawn));
            }
        }
    }
    assert_eq!(pseudo_legal_moves(&board, pos(4, 4)).len(), 8);
}

#[test]
fn test_rook_rays_on_open_board() {
    let mut board = Board::new();
    board.place(pos(4, 4), Piece::new(Color::White, PieceKind::Rook));
    // 7 squares along the rank plus 7 along the file.
    assert_eq!(pseudo_legal_moves(&board, pos(4, 4)).len(), 14);
}

#[test]
fn test_ray_stops_before_own_piece_and_on_capture() {
    let mut board = Board::new();
    board.place(pos(1, 1), Piece::new(Color::White, PieceKind::Rook));
    board.place(pos(1, 4), Piece::new(Color::White, PieceKind::Pawn));
    board.place(pos(5, 1), Piece::new(Color::Black, PieceKind::Pawn));

    let destinations = ends(&pseudo_legal_moves(&board, pos(1, 1)));
    // Rank: b1, c1 only (own pawn on d1 blocks and is excluded).
    assert!(destinations.contains(&pos(1, 2)));
    assert!(destinations.contains(&pos(1, 3)));
    assert!(!destinations.contains(&pos(1, 4)));
    assert!(!destinations.contains(&pos(1, 5)));
    // File: up to and including the black pawn on a5, nothing past it.
    assert!(destinations.contains(&pos(5, 1)));
    assert!(!destinations.contains(&pos(6, 1)));
    assert_eq!(destinations.len(), 6);
}

#[test]
fn test_bishop_moves_diagonally_only() {
    let mut board = Board::new();
    board.place(pos(4, 4), Piece::new(Color::Black, PieceKind::Bishop));
    let destinations = ends(&pseudo_legal_moves(&board, pos(4, 4)));
    assert_eq!(destinations.len(), 13);
    assert!(destinations.contains(&pos(1, 1)));
    assert!(destinations.contains(&pos(8, 8)));
    assert!(!destinations.contains(&pos(4, 5)));
}

#[test]
fn test_queen_combines_rook_and_bishop() {
    let mut board = Board::new();
    board.place(pos(4, 4), Piece::new(Color::White, PieceKind::Queen));
    assert_eq!(pseudo_legal_moves(&board, pos(4, 4)).len(), 14 + 13);
}

#[test]
fn test_pawn_single_and_double_push_from_home_rank() {
    let board = Board::standard_start();
    let moves = pseudo_legal_moves(&board, pos(2, 5));
    let destinations = ends(&moves);
    assert_eq!(moves.len(), 2);
    assert!(destinations.contains(&pos(3, 5)));
    assert!(destinations.contains(&pos(4, 5)));
}

#[test]
fn test_pawn_single_push_only_off_home_rank() {
    let mut board = Board::new();
    board.place(pos(3, 5), Piece::new(Color::White, PieceKind::Pawn));
    let moves = pseudo_legal_moves(&board, pos(3, 5));
    assert_eq!(ends(&moves), vec![pos(4, 5)]);
}

#[test]
fn test_pawn_blocked_by_any_piece_ahead() {
    let mut board = Board::new();
    board.place(pos(2, 5), Piece::new(Color::White, PieceKind::Pawn));
    board.place(pos(3, 5), Piece::new(Color::Black, PieceKind::Knight));
    assert!(pseudo_legal_moves(&board, pos(2, 5)).is_empty());
}

#[test]
fn test_pawn_double_push_needs_both_squares_empty() {
    let mut board = Board::new();
    board.place(pos(2, 5), Piece::new(Color::White, PieceKind::Pawn));
    board.place(pos(4, 5), Piece::new(Color::Black, PieceKind::Knight));
    // Single push works, the double is blocked at the destination.
    assert_eq!(ends(&pseudo_legal_moves(&board, pos(2, 5))), vec![pos(3, 5)]);
}

#[test]
fn test_pawn_captures_diagonally() {
    let mut board = Board::new();
    board.place(pos(4, 4), Piece::new(Color::White, PieceKind::Pawn));
    board.place(pos(5, 3), Piece::new(Color::Black, PieceKind::Pawn));
    board.place(pos(5, 5), Piece::new(Color::White, PieceKind::Pawn));

    let destinations = ends(&pseudo_legal_moves(&board, pos(4, 4)));
    // Forward push plus the one enemy diagonal; the own-color diagonal
    // is not a capture.
    assert!(destinations.contains(&pos(5, 4)));
    assert!(destinations.contains(&pos(5, 3)));
    assert!(!destinations.contains(&pos(5, 5)));
    assert_eq!(destinations.len(), 2);
}

#[test]
fn test_black_pawn_moves_down_the_board() {
    let board = Board::standard_start();
    let destinations = ends(&pseudo_legal_moves(&board, pos(7, 5)));
    assert!(destinations.contains(&pos(6, 5)));
    assert!(destinations.contains(&pos(5, 5)));
}

#[test]
fn test_pawn_promotion_expands_into_four_moves() {
    let mut board = Board::new();
    board.place(pos(7, 5), Piece::new(Color::White, PieceKind::Pawn));
    let moves = pseudo_legal_moves(&board, pos(7, 5));
    assert_eq!(moves.len(), 4);
    for kind in PROMOTION_CHOICES {
        assert!(moves.contains(&Move::promoting(pos(7, 5), pos(8, 5), kind)));
    }
}

#[test]
fn test_every_piece_kind_moves_from_an_open_center() {
    for kind in PieceKind::iter() {
        let mut board = Board::new();
        board.place(pos(4, 4), Piece::new(Color::White, kind));
        assert!(
            !pseudo_legal_moves(&board, pos(4, 4)).is_empty(),
            "{kind:?} generated no moves from d4"
        );
    }
}

#[test]
fn test_pawn_promotion_on_capture() {
    let mut board = Board::new();
    board.place(pos(2, 5), Piece::new(Color::Black, PieceKind::Pawn));
    board.place(pos(1, 4), Piece::new(Color::White, PieceKind::Rook));
    board.place(pos(1, 5), Piece::new(Color::White, PieceKind::Rook));

    let moves = pseudo_legal_moves(&board, pos(2, 5));
    // The forward push is blocked; the capture expands into the four
    // promotion choices.
    assert_eq!(moves.len(), 4);
    for mv in &moves {
        assert_eq!(mv.end, pos(1, 4));
        assert!(mv.promotion.is_some());
    }
}
