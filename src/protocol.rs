//! JSON wire protocol: one object per message over a persistent
//! connection. Field names match the historical payloads (`authToken`,
//! `gameID`, `move.start.row`...), so existing clients keep working.

use serde::{Deserialize, Serialize};

use crate::chess::{GameState, Move};

/// An inbound command, tagged by `commandType`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "commandType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientCommand {
    /// Join a match as a player or observer.
    #[serde(rename_all = "camelCase")]
    Connect {
        /// Opaque token resolved by the auth collaborator.
        auth_token: String,
        /// Target match id.
        #[serde(rename = "gameID")]
        game_id: i64,
    },
    /// Attempt a move in a match.
    #[serde(rename_all = "camelCase")]
    MakeMove {
        /// Opaque token resolved by the auth collaborator.
        auth_token: String,
        /// Target match id.
        #[serde(rename = "gameID")]
        game_id: i64,
        /// The requested move.
        #[serde(rename = "move")]
        mv: Move,
    },
    /// Leave a match, vacating a held seat.
    #[serde(rename_all = "camelCase")]
    Leave {
        /// Opaque token resolved by the auth collaborator.
        auth_token: String,
        /// Target match id.
        #[serde(rename = "gameID")]
        game_id: i64,
    },
    /// Resign the game without leaving the match.
    #[serde(rename_all = "camelCase")]
    Resign {
        /// Opaque token resolved by the auth collaborator.
        auth_token: String,
        /// Target match id.
        #[serde(rename = "gameID")]
        game_id: i64,
    },
}

impl ClientCommand {
    /// The match id the command targets.
    pub fn game_id(&self) -> i64 {
        match self {
            ClientCommand::Connect { game_id, .. }
            | ClientCommand::MakeMove { game_id, .. }
            | ClientCommand::Leave { game_id, .. }
            | ClientCommand::Resign { game_id, .. } => *game_id,
        }
    }
}

/// An outbound message, tagged by `serverMessageType`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "serverMessageType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    /// The full authoritative game state.
    #[serde(rename_all = "camelCase")]
    LoadGame {
        /// Board contents, side to move, and over flag.
        game: GameState,
    },
    /// A free-text event notification.
    Notification {
        /// Human-readable text.
        message: String,
    },
    /// A free-text error, delivered to the offending session only.
    Error {
        /// Human-readable text.
        #[serde(rename = "errorMessage")]
        message: String,
    },
}

impl ServerMessage {
    /// Builds a `LOAD_GAME` message from a state snapshot.
    pub fn load_game(state: &GameState) -> Self {
        ServerMessage::LoadGame {
            game: state.clone(),
        }
    }

    /// Builds a `NOTIFICATION` message.
    pub fn notification(message: impl Into<String>) -> Self {
        ServerMessage::Notification {
            message: message.into(),
        }
    }

    /// Builds an `ERROR` message.
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}
