//! Authentication collaborator seam.
//!
//! Registration, login, and password handling live outside this crate;
//! the coordinator only needs to resolve an opaque token to a stable
//! identity string. [`TokenTable`] is the in-memory implementation used
//! by the binary and the tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use derive_more::{Display, Error};
use tracing::{debug, instrument, warn};

/// A missing or invalid token. Carries no detail so the token itself is
/// never echoed back to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("invalid auth token")]
pub struct AuthError;

/// Maps an opaque token to a stable identity.
#[async_trait]
pub trait AuthVerifier: Send + Sync {
    /// Resolves `token`, or fails with [`AuthError`].
    async fn authenticate(&self, token: &str) -> Result<String, AuthError>;
}

/// In-memory token table.
#[derive(Debug, Default)]
pub struct TokenTable {
    tokens: RwLock<HashMap<String, String>>,
}

impl TokenTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token for an identity.
    #[instrument(skip_all)]
    pub fn insert(&self, token: impl Into<String>, identity: impl Into<String>) {
        let identity = identity.into();
        debug!(identity = %identity, "registering token");
        self.tokens.write().unwrap().insert(token.into(), identity);
    }
}

#[async_trait]
impl AuthVerifier for TokenTable {
    async fn authenticate(&self, token: &str) -> Result<String, AuthError> {
        match self.tokens.read().unwrap().get(token) {
            Some(identity) => Ok(identity.clone()),
            None => {
                warn!("rejected unknown token");
                Err(AuthError)
            }
        }
    }
}
