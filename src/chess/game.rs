//! Turn-taking game engine built on [`Board`] and the move generator.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::board::Board;
use super::movegen;
use super::moves::Move;
use super::position::Position;
use super::types::{Color, Piece};

/// Whether a game still accepts moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameStatus {
    /// Moves are accepted.
    Active,
    /// Terminal. No further moves are accepted.
    Over,
}

/// Errors from attempting a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The game has ended; the board no longer changes.
    #[display("the game is already over")]
    GameOver,
    /// There is no piece on the start square.
    #[display("no piece at {pos}")]
    NoPiece {
        /// The empty start square.
        pos: Position,
    },
    /// The piece on the start square belongs to the side not on move.
    #[display("it is {color}'s turn")]
    OutOfTurn {
        /// The side actually on move.
        color: Color,
    },
    /// The move is not a member of the piece's legal moves.
    #[display("illegal move: {mv}")]
    NotLegal {
        /// The rejected move.
        mv: Move,
    },
}

/// Complete state of one game: board, side to move, and status.
///
/// Snapshots serialize to JSON and round-trip to an equal value; this is
/// the payload a `LOAD_GAME` message carries and the unit the storage
/// seam persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    board: Board,
    to_move: Color,
    status: GameStatus,
}

impl GameState {
    /// Standard starting position, White to move, active.
    pub fn new() -> Self {
        Self {
            board: Board::standard_start(),
            to_move: Color::White,
            status: GameStatus::Active,
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// The game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// The game engine: validates moves against the full legality rule and
/// owns the only mutable path to a match's [`GameState`].
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Creates a game from the standard starting position.
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// Restores a game from a stored snapshot.
    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    /// Creates a game from an arbitrary board and side to move, evaluating
    /// the status of the side to move (a constructed position may already
    /// be checkmate or stalemate).
    pub fn from_parts(board: Board, to_move: Color) -> Self {
        let mut game = Self {
            state: GameState {
                board,
                to_move,
                status: GameStatus::Active,
            },
        };
        game.update_status();
        game
    }

    /// Current state snapshot.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// The side to move.
    pub fn to_move(&self) -> Color {
        self.state.to_move
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.state.status == GameStatus::Over
    }

    /// Legal moves for the piece at `pos`.
    ///
    /// `None` means no piece sits on `pos` — distinct from a piece with an
    /// empty move list. Each pseudo-legal move is simulated on a board
    /// copy and kept only if the mover's own king is not attacked on the
    /// simulated board, so pinned pieces yield fewer or zero moves.
    pub fn legal_moves(&self, pos: Position) -> Option<Vec<Move>> {
        let piece = self.state.board.get(pos)?;
        let moves = movegen::pseudo_legal_moves(&self.state.board, pos)
            .into_iter()
            .filter(|mv| !self.leaves_king_attacked(piece.color, *mv))
            .collect();
        Some(moves)
    }

    /// Applies a move, or explains why it cannot be applied.
    ///
    /// On success the (possibly promoted) piece lands on `move.end`, the
    /// origin square empties, the side to move flips, and the opponent is
    /// re-evaluated: checkmate or stalemate transitions the game to
    /// [`GameStatus::Over`].
    #[instrument(skip(self), fields(mv = %mv, to_move = %self.state.to_move))]
    pub fn apply_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let piece = self
            .state
            .board
            .get(mv.start)
            .ok_or(MoveError::NoPiece { pos: mv.start })?;
        if piece.color != self.state.to_move {
            return Err(MoveError::OutOfTurn {
                color: self.state.to_move,
            });
        }
        let legal = self.legal_moves(mv.start).unwrap_or_default();
        if !legal.contains(&mv) {
            return Err(MoveError::NotLegal { mv });
        }

        self.state.board.remove(mv.start);
        let placed = match mv.promotion {
            Some(kind) => Piece::new(piece.color, kind),
            None => piece,
        };
        self.state.board.place(mv.end, placed);
        self.state.to_move = self.state.to_move.opponent();
        self.update_status();

        debug!(status = ?self.state.status, "move applied");
        Ok(())
    }

    /// True iff the color's king exists and its square is attacked.
    /// A missing king means "cannot be in check", never an error.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.state.board.find_king(color) {
            Some(king) => self.state.board.is_attacked(king, color),
            None => false,
        }
    }

    /// True iff every piece of the color has an empty legal-move list.
    /// Checkmate and stalemate both reduce to this scan.
    pub fn no_legal_moves(&self, color: Color) -> bool {
        self.state
            .board
            .pieces()
            .filter(|(_, piece)| piece.color == color)
            .all(|(pos, _)| {
                self.legal_moves(pos)
                    .map_or(true, |moves| moves.is_empty())
            })
    }

    /// In check with no legal moves.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && self.no_legal_moves(color)
    }

    /// Not in check, but no legal moves either.
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && self.no_legal_moves(color)
    }

    /// Ends the game unconditionally. The board is untouched.
    #[instrument(skip(self))]
    pub fn resign(&mut self) {
        self.state.status = GameStatus::Over;
    }

    /// Simulates `mv` on a copy of the board and reports whether the
    /// mover's king is attacked afterwards. The test runs against the
    /// simulated board, not the original.
    fn leaves_king_attacked(&self, color: Color, mv: Move) -> bool {
        let mut simulated = self.state.board.clone();
        let Some(piece) = simulated.remove(mv.start) else {
            return false;
        };
        let placed = match mv.promotion {
            Some(kind) => Piece::new(piece.color, kind),
            None => piece,
        };
        simulated.place(mv.end, placed);
        match simulated.find_king(color) {
            Some(king) => simulated.is_attacked(king, color),
            None => false,
        }
    }

    /// Re-evaluates the side now on move; no legal moves (checkmate or
    /// stalemate alike) ends the game.
    fn update_status(&mut self) {
        if self.no_legal_moves(self.state.to_move) {
            self.state.status = GameStatus::Over;
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
