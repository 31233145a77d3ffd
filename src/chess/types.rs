//! Core piece value types.

use serde::{Deserialize, Serialize};

/// The two sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    /// Moves first.
    White,
    /// Moves second.
    Black,
}

impl Color {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// The six piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
#[serde(rename_all = "UPPERCASE")]
pub enum PieceKind {
    /// Single-step in all eight directions.
    King,
    /// Rook and bishop movement combined.
    Queen,
    /// Diagonal rays.
    Bishop,
    /// Fixed L-shaped jumps.
    Knight,
    /// Horizontal and vertical rays.
    Rook,
    /// Forward pushes and diagonal captures.
    Pawn,
}

/// The kinds a pawn may promote to on reaching the far rank.
pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// A piece: a color and a kind. Equality is by both fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Which side owns the piece.
    pub color: Color,
    /// What kind of piece it is.
    pub kind: PieceKind,
}

impl Piece {
    /// Creates a piece.
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}
