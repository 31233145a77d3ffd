//! Connected sessions: one per live connection, bound to one match and
//! one role for its whole lifetime.

use std::time::Duration;

use derive_more::{Display, Error};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendTimeoutError;

use crate::chess::Color;
use crate::protocol::ServerMessage;

/// Process-unique session identifier.
pub type SessionId = u64;

/// A session's standing in a match, resolved once at CONNECT time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Holds the white seat.
    White,
    /// Holds the black seat.
    Black,
    /// Watches; may never move or resign.
    Observer,
}

impl Role {
    /// Maps a recorded seat color to a role; no seat means observer.
    pub fn from_seat(seat: Option<Color>) -> Self {
        match seat {
            Some(Color::White) => Role::White,
            Some(Color::Black) => Role::Black,
            None => Role::Observer,
        }
    }

    /// The seat color this role plays, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Role::White => Some(Color::White),
            Role::Black => Some(Color::Black),
            Role::Observer => None,
        }
    }

    /// Wording used in join notifications.
    pub fn describe(self) -> &'static str {
        match self {
            Role::White => "white",
            Role::Black => "black",
            Role::Observer => "an observer",
        }
    }
}

/// A send to one recipient failed; never surfaced to other recipients or
/// to the command that triggered the send.
#[derive(Debug, Clone, Copy, Display, Error)]
pub enum DeliveryError {
    /// The outbound queue stayed full past the bound.
    #[display("send timed out")]
    TimedOut,
    /// The session's connection is gone.
    #[display("session channel closed")]
    Closed,
}

/// One connected participant of a match.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    identity: String,
    role: Role,
    outbound: mpsc::Sender<ServerMessage>,
}

impl Session {
    /// Binds a connection identity to a match role and outbound queue.
    pub(crate) fn new(
        id: SessionId,
        identity: String,
        role: Role,
        outbound: mpsc::Sender<ServerMessage>,
    ) -> Self {
        Self {
            id,
            identity,
            role,
            outbound,
        }
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Authenticated identity bound at CONNECT.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Role resolved at CONNECT.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Queues a message for this session, bounded by `timeout`. Failure
    /// is the caller's to log; it must never propagate further.
    pub(crate) async fn send(
        &self,
        message: ServerMessage,
        timeout: Duration,
    ) -> Result<(), DeliveryError> {
        self.outbound
            .send_timeout(message, timeout)
            .await
            .map_err(|err| match err {
                SendTimeoutError::Timeout(_) => DeliveryError::TimedOut,
                SendTimeoutError::Closed(_) => DeliveryError::Closed,
            })
    }
}
