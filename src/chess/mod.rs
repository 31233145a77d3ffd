//! The chess rules engine: board, pieces, move generation, and the
//! turn-taking game state machine.

mod board;
mod game;
pub mod movegen;
mod moves;
mod position;
mod types;

pub use board::Board;
pub use game::{Game, GameState, GameStatus, MoveError};
pub use moves::Move;
pub use position::{OutOfBounds, Position};
pub use types::{Color, Piece, PieceKind, PROMOTION_CHOICES};
