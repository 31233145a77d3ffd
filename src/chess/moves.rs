//! The move value type.

use serde::{Deserialize, Serialize};

use super::position::Position;
use super::types::PieceKind;

/// A move from one square to another, with an optional promotion choice.
///
/// Promotion is meaningful only for a pawn landing on the far rank; move
/// generation expands such a landing into one move per promotion choice,
/// so a bare far-rank pawn move is never a member of the legal set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Square the piece moves from.
    pub start: Position,
    /// Square the piece moves to.
    pub end: Position,
    /// Piece kind a pawn becomes on the far rank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a move without a promotion.
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            promotion: None,
        }
    }

    /// Creates a promoting move.
    pub fn promoting(start: Position, end: Position, kind: PieceKind) -> Self {
        Self {
            start,
            end,
            promotion: Some(kind),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}
