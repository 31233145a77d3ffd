//! Match metadata collaborator seam.
//!
//! An external lobby/matchmaking service owns match records and seat
//! assignment; the coordinator reads the recorded seats to resolve a
//! session's role and writes back only when a player vacates a seat on
//! LEAVE. [`MemoryDirectory`] is the in-memory implementation used by the
//! binary and the tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

use crate::chess::Color;

/// Errors from the match directory.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum DirectoryError {
    /// No match with the given id exists.
    #[display("game {match_id} not found")]
    NotFound {
        /// The unknown match id.
        match_id: i64,
    },
}

/// A match's recorded metadata: display name and seat identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchMeta {
    name: String,
    white_seat: Option<String>,
    black_seat: Option<String>,
}

impl MatchMeta {
    /// Creates metadata with both seats empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            white_seat: None,
            black_seat: None,
        }
    }

    /// Display name of the match.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity recorded for the white seat.
    pub fn white_seat(&self) -> Option<&str> {
        self.white_seat.as_deref()
    }

    /// Identity recorded for the black seat.
    pub fn black_seat(&self) -> Option<&str> {
        self.black_seat.as_deref()
    }

    /// The seat color held by `identity`, if any.
    pub fn seat_of(&self, identity: &str) -> Option<Color> {
        if self.white_seat.as_deref() == Some(identity) {
            Some(Color::White)
        } else if self.black_seat.as_deref() == Some(identity) {
            Some(Color::Black)
        } else {
            None
        }
    }
}

/// Read access to match metadata plus the single write the coordinator
/// performs (vacating a seat on LEAVE).
#[async_trait]
pub trait MatchDirectory: Send + Sync {
    /// Fetches metadata for a match id.
    async fn lookup(&self, match_id: i64) -> Result<MatchMeta, DirectoryError>;

    /// Clears whichever seat `identity` holds in the match. A no-op when
    /// the identity holds no seat.
    async fn vacate_seat(&self, match_id: i64, identity: &str) -> Result<(), DirectoryError>;
}

/// In-memory match directory.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    matches: RwLock<HashMap<i64, MatchMeta>>,
}

impl MemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a match, replacing any previous entry with the same id.
    #[instrument(skip(self, name))]
    pub fn create_match(&self, match_id: i64, name: impl Into<String>) {
        let meta = MatchMeta::new(name);
        info!(match_id, name = %meta.name, "recording match");
        self.matches.write().unwrap().insert(match_id, meta);
    }

    /// Assigns an identity to a seat.
    #[instrument(skip(self, identity))]
    pub fn seat_player(
        &self,
        match_id: i64,
        color: Color,
        identity: impl Into<String>,
    ) -> Result<(), DirectoryError> {
        let mut matches = self.matches.write().unwrap();
        let meta = matches
            .get_mut(&match_id)
            .ok_or(DirectoryError::NotFound { match_id })?;
        let identity = identity.into();
        debug!(match_id, %color, identity = %identity, "seating player");
        match color {
            Color::White => meta.white_seat = Some(identity),
            Color::Black => meta.black_seat = Some(identity),
        }
        Ok(())
    }
}

#[async_trait]
impl MatchDirectory for MemoryDirectory {
    async fn lookup(&self, match_id: i64) -> Result<MatchMeta, DirectoryError> {
        self.matches
            .read()
            .unwrap()
            .get(&match_id)
            .cloned()
            .ok_or(DirectoryError::NotFound { match_id })
    }

    async fn vacate_seat(&self, match_id: i64, identity: &str) -> Result<(), DirectoryError> {
        let mut matches = self.matches.write().unwrap();
        let meta = matches
            .get_mut(&match_id)
            .ok_or(DirectoryError::NotFound { match_id })?;
        match meta.seat_of(identity) {
            Some(Color::White) => meta.white_seat = None,
            Some(Color::Black) => meta.black_seat = None,
            None => {
                warn!(match_id, "vacate requested for an identity holding no seat");
            }
        }
        Ok(())
    }
}
