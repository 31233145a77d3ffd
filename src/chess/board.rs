//! Square-addressed piece store. No game semantics live here; the board
//! only knows which piece sits on which square.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::movegen;
use super::position::Position;
use super::types::{Color, Piece, PieceKind};

/// Back-rank layout, a-file through h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 board holding at most one piece per square.
///
/// Created empty or via [`Board::standard_start`]; mutated only through
/// [`Board::place`] and [`Board::remove`]. Cloning is cheap enough to
/// simulate a hypothetical move without touching the authoritative copy.
///
/// A board serializes as its list of occupied squares, since JSON cannot
/// key a map by a struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<OccupiedSquare>", from = "Vec<OccupiedSquare>")]
pub struct Board {
    squares: HashMap<Position, Piece>,
}

/// Wire form of one occupied square.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct OccupiedSquare {
    pos: Position,
    piece: Piece,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            squares: HashMap::new(),
        }
    }

    /// Creates a board with the standard 32-piece starting layout.
    pub fn standard_start() -> Self {
        let mut board = Board::new();
        for pos in Position::all() {
            let file = (pos.col() - 1) as usize;
            match pos.row() {
                1 => board.place(pos, Piece::new(Color::White, BACK_RANK[file])),
                2 => board.place(pos, Piece::new(Color::White, PieceKind::Pawn)),
                7 => board.place(pos, Piece::new(Color::Black, PieceKind::Pawn)),
                8 => board.place(pos, Piece::new(Color::Black, BACK_RANK[file])),
                _ => {}
            }
        }
        board
    }

    /// Puts a piece on a square, replacing whatever was there.
    pub fn place(&mut self, pos: Position, piece: Piece) {
        self.squares.insert(pos, piece);
    }

    /// Removes and returns the piece on a square, if any.
    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.squares.remove(&pos)
    }

    /// Returns the piece on a square, if any.
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.squares.get(&pos).copied()
    }

    /// Iterates the occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares.iter().map(|(pos, piece)| (*pos, *piece))
    }

    /// Finds the king of the given color.
    ///
    /// `None` means the king is absent from the board; callers treat that
    /// as "cannot be in check" rather than an error.
    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| piece.color == color && piece.kind == PieceKind::King)
            .map(|(pos, _)| pos)
    }

    /// Whether any piece of the color opposing `defender` has `pos` among
    /// its pseudo-legal destinations.
    pub fn is_attacked(&self, pos: Position, defender: Color) -> bool {
        self.pieces()
            .filter(|(_, piece)| piece.color != defender)
            .any(|(from, _)| {
                movegen::pseudo_legal_moves(self, from)
                    .iter()
                    .any(|mv| mv.end == pos)
            })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Board> for Vec<OccupiedSquare> {
    fn from(board: Board) -> Self {
        let mut entries: Vec<_> = board
            .squares
            .into_iter()
            .map(|(pos, piece)| OccupiedSquare { pos, piece })
            .collect();
        // Snapshots list squares in row-major order.
        entries.sort_by_key(|entry| (entry.pos.row(), entry.pos.col()));
        entries
    }
}

impl From<Vec<OccupiedSquare>> for Board {
    fn from(entries: Vec<OccupiedSquare>) -> Self {
        let mut board = Board::new();
        for entry in entries {
            board.place(entry.pos, entry.piece);
        }
        board
    }
}
