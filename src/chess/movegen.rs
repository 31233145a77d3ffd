//! Pseudo-legal move generation: destinations consistent with each piece's
//! movement rule, without regard to whether the mover's king is left in
//! check. Legality filtering is the engine's job ([`super::game`]).

use super::board::Board;
use super::moves::Move;
use super::position::Position;
use super::types::{Color, PieceKind, PROMOTION_CHOICES};

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Generates the pseudo-legal moves for the piece at `pos`.
///
/// Returns an empty list when the square is empty. Off-board destinations
/// are silently discarded everywhere; they never surface as errors.
pub fn pseudo_legal_moves(board: &Board, pos: Position) -> Vec<Move> {
    let Some(piece) = board.get(pos) else {
        return Vec::new();
    };

    match piece.kind {
        PieceKind::King => step_moves(board, pos, piece.color, &KING_OFFSETS),
        PieceKind::Knight => step_moves(board, pos, piece.color, &KNIGHT_OFFSETS),
        PieceKind::Bishop => ray_moves(board, pos, piece.color, &BISHOP_DIRECTIONS),
        PieceKind::Rook => ray_moves(board, pos, piece.color, &ROOK_DIRECTIONS),
        PieceKind::Queen => {
            let mut moves = ray_moves(board, pos, piece.color, &ROOK_DIRECTIONS);
            moves.extend(ray_moves(board, pos, piece.color, &BISHOP_DIRECTIONS));
            moves
        }
        PieceKind::Pawn => pawn_moves(board, pos, piece.color),
    }
}

/// Single-step movement from a fixed offset list (king, knight). A
/// destination is kept if it is empty or holds the opposite color.
fn step_moves(board: &Board, pos: Position, color: Color, offsets: &[(i8, i8)]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(d_row, d_col) in offsets {
        let Some(dest) = pos.offset(d_row, d_col) else {
            continue;
        };
        match board.get(dest) {
            Some(occupant) if occupant.color == color => {}
            _ => moves.push(Move::new(pos, dest)),
        }
    }
    moves
}

/// Ray-cast movement (bishop, rook, and queen via both direction sets).
/// Each ray stops at the first occupied square, which is included only as
/// an opposite-color capture; the board edge ends the ray silently.
fn ray_moves(board: &Board, pos: Position, color: Color, directions: &[(i8, i8)]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(d_row, d_col) in directions {
        for step in 1..8 {
            let Some(dest) = pos.offset(d_row * step, d_col * step) else {
                break;
            };
            match board.get(dest) {
                None => moves.push(Move::new(pos, dest)),
                Some(occupant) => {
                    if occupant.color != color {
                        moves.push(Move::new(pos, dest));
                    }
                    break;
                }
            }
        }
    }
    moves
}

/// Pawn movement: a single push onto an empty square, a double push from
/// the home rank across two empty squares, and diagonal captures onto
/// opposite-color squares. No en-passant.
fn pawn_moves(board: &Board, pos: Position, color: Color) -> Vec<Move> {
    let (forward, home_rank, far_rank) = match color {
        Color::White => (1, 2, 8),
        Color::Black => (-1, 7, 1),
    };

    let mut moves = Vec::new();

    if let Some(dest) = pos.offset(forward, 0) {
        if board.get(dest).is_none() {
            push_pawn_move(&mut moves, pos, dest, far_rank);
            if pos.row() == home_rank {
                if let Some(double) = pos.offset(2 * forward, 0) {
                    if board.get(double).is_none() {
                        // A double push never reaches the far rank.
                        moves.push(Move::new(pos, double));
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(dest) = pos.offset(forward, d_col) else {
            continue;
        };
        if let Some(occupant) = board.get(dest) {
            if occupant.color != color {
                push_pawn_move(&mut moves, pos, dest, far_rank);
            }
        }
    }

    moves
}

/// Records a pawn move, expanding a far-rank landing into one move per
/// promotion choice.
fn push_pawn_move(moves: &mut Vec<Move>, start: Position, end: Position, far_rank: i8) {
    if end.row() == far_rank {
        for kind in PROMOTION_CHOICES {
            moves.push(Move::promoting(start, end, kind));
        }
    } else {
        moves.push(Move::new(start, end));
    }
}
