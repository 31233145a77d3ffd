//! The match registry: match id → one engine plus the sessions watching
//! it. The outer map lock is only ever held to fetch or insert an entry
//! handle; command handling serializes on the entry's own async mutex, so
//! distinct matches never block each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info};

use crate::chess::Game;

use super::session::{Session, SessionId};

/// Shared state of one match: the engine and the connected sessions.
#[derive(Debug)]
pub(crate) struct MatchEntry {
    game: Game,
    sessions: HashMap<SessionId, Session>,
}

impl MatchEntry {
    fn new(game: Game) -> Self {
        Self {
            game,
            sessions: HashMap::new(),
        }
    }

    pub(crate) fn game(&self) -> &Game {
        &self.game
    }

    pub(crate) fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub(crate) fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub(crate) fn add_session(&mut self, session: Session) {
        debug!(session_id = session.id(), "registering session");
        self.sessions.insert(session.id(), session);
    }

    /// Removes and returns a session. Dropping the returned value closes
    /// its outbound queue once the transport side lets go too.
    pub(crate) fn remove_session(&mut self, id: SessionId) -> Option<Session> {
        self.sessions.remove(&id)
    }

    pub(crate) fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

    pub(crate) fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

/// Match id → entry handle. Entries are created lazily on first CONNECT
/// and never deleted while the process runs; restart loses them.
#[derive(Debug, Default)]
pub(crate) struct MatchRegistry {
    matches: Mutex<HashMap<i64, Arc<AsyncMutex<MatchEntry>>>>,
}

impl MatchRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fetches the handle for a match id, if one exists.
    pub(crate) fn get(&self, match_id: i64) -> Option<Arc<AsyncMutex<MatchEntry>>> {
        self.matches.lock().unwrap().get(&match_id).cloned()
    }

    /// Fetches the handle for a match id, inserting a fresh entry from
    /// `make` when absent. When two connects race, the first insert wins
    /// and the loser's game is discarded unused.
    pub(crate) fn get_or_insert_with(
        &self,
        match_id: i64,
        make: impl FnOnce() -> Game,
    ) -> Arc<AsyncMutex<MatchEntry>> {
        let mut matches = self.matches.lock().unwrap();
        matches
            .entry(match_id)
            .or_insert_with(|| {
                info!(match_id, "creating match entry");
                Arc::new(AsyncMutex::new(MatchEntry::new(make())))
            })
            .clone()
    }
}
