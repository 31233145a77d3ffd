//! Game-state storage seam.
//!
//! Match state is in-memory only by default: the registry holds the live
//! engine, and [`MemoryGameStore`] keeps the last saved snapshot per
//! match id in a process-local map. Nothing survives a restart. The trait
//! exists so a durable store can be substituted without touching the
//! engine or the coordinator.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use derive_more::{Display, Error};
use tracing::{debug, instrument};

use crate::chess::GameState;

/// A storage failure. The coordinator treats these as non-fatal: the live
/// in-memory state remains authoritative.
#[derive(Debug, Clone, Display, Error)]
#[display("game store error: {message}")]
pub struct StoreError {
    /// What went wrong.
    pub message: String,
}

/// Loads and saves game-state snapshots keyed by match id.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Fetches the stored snapshot for a match, `None` if absent.
    async fn load(&self, match_id: i64) -> Result<Option<GameState>, StoreError>;

    /// Persists a snapshot for a match.
    async fn save(&self, match_id: i64, state: &GameState) -> Result<(), StoreError>;
}

/// Process-local snapshot store.
#[derive(Debug, Default)]
pub struct MemoryGameStore {
    states: RwLock<HashMap<i64, GameState>>,
}

impl MemoryGameStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for MemoryGameStore {
    #[instrument(skip(self))]
    async fn load(&self, match_id: i64) -> Result<Option<GameState>, StoreError> {
        Ok(self.states.read().unwrap().get(&match_id).cloned())
    }

    #[instrument(skip(self, state))]
    async fn save(&self, match_id: i64, state: &GameState) -> Result<(), StoreError> {
        debug!(match_id, status = ?state.status(), "saving snapshot");
        self.states
            .write()
            .unwrap()
            .insert(match_id, state.clone());
        Ok(())
    }
}
