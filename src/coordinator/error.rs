//! The command error taxonomy. Every variant is a sender-only error: it
//! is reported to the originating session and changes no other session's
//! state. None of them are fatal to the serving process.

use derive_more::{Display, Error, From};

use crate::auth::AuthError;
use crate::chess::MoveError;
use crate::directory::DirectoryError;

/// Why a command was rejected.
#[derive(Debug, Clone, Display, Error, From)]
pub enum CommandError {
    /// The token was missing or invalid.
    #[display("authentication failed: {_0}")]
    #[from]
    Authentication(AuthError),

    /// No match with the given id.
    #[display("game {match_id} not found")]
    GameNotFound {
        /// The unknown match id.
        match_id: i64,
    },

    /// The sender's role does not permit the command: an observer moving,
    /// a wrong-turn move, or acting on a seat the sender does not hold.
    #[display("not authorized: {reason}")]
    Authorization {
        /// Human-readable reason.
        reason: String,
    },

    /// The engine rejected the move; the board is unchanged.
    #[display("{_0}")]
    #[from]
    IllegalMove(MoveError),

    /// The payload could not be parsed. The connection stays open.
    #[display("malformed command: {reason}")]
    Malformed {
        /// Parse failure detail.
        reason: String,
    },
}

impl CommandError {
    /// Shorthand for an [`CommandError::Authorization`] rejection.
    pub fn authorization(reason: impl Into<String>) -> Self {
        CommandError::Authorization {
            reason: reason.into(),
        }
    }
}

impl From<DirectoryError> for CommandError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound { match_id } => CommandError::GameNotFound { match_id },
        }
    }
}
