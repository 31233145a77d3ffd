//! Validated square coordinates for the 8x8 board.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Error for a coordinate pair that falls outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("position out of bounds: row {row}, col {col} (both must be 1-8)")]
pub struct OutOfBounds {
    /// Rejected row value.
    pub row: i8,
    /// Rejected column value.
    pub col: i8,
}

/// A square on the board.
///
/// Rows and columns both run 1 through 8. Row 1 is White's back rank and
/// column 1 is the a-file, so `Position::new(2, 5)` is the e2 square.
/// Construction outside that range is rejected, and deserialization goes
/// through the same validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition", into = "RawPosition")]
pub struct Position {
    row: i8,
    col: i8,
}

/// Unvalidated wire form of a [`Position`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawPosition {
    row: i8,
    col: i8,
}

impl Position {
    /// Creates a position, rejecting coordinates outside 1-8.
    pub fn new(row: i8, col: i8) -> Result<Self, OutOfBounds> {
        if (1..=8).contains(&row) && (1..=8).contains(&col) {
            Ok(Self { row, col })
        } else {
            Err(OutOfBounds { row, col })
        }
    }

    /// Row of this position (1-8).
    pub fn row(self) -> i8 {
        self.row
    }

    /// Column of this position (1-8).
    pub fn col(self) -> i8 {
        self.col
    }

    /// Returns the position shifted by the given deltas, or `None` if the
    /// result leaves the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::new(self.row + d_row, self.col + d_col).ok()
    }

    /// Iterates every square of the board, a1 through h8.
    pub fn all() -> impl Iterator<Item = Position> {
        (1..=8).flat_map(|row| (1..=8).map(move |col| Position { row, col }))
    }
}

impl TryFrom<RawPosition> for Position {
    type Error = OutOfBounds;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.row, raw.col)
    }
}

impl From<Position> for RawPosition {
    fn from(pos: Position) -> Self {
        RawPosition {
            row: pos.row,
            col: pos.col,
        }
    }
}

impl std::fmt::Display for Position {
    /// Algebraic notation: column as a file letter, then the row number.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = (b'a' + (self.col - 1) as u8) as char;
        write!(f, "{}{}", file, self.row)
    }
}
