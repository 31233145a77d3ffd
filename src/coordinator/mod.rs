//! Session registry and broadcast coordinator.
//!
//! One engine instance per active match id, one exclusive handling slot
//! per match id, and best-effort fan-out to every registered session.
//! Command handling is atomic per match: a move fully
//! read-validates-applies-broadcasts before the next command against the
//! same match begins, while distinct matches proceed independently.

mod error;
mod registry;
mod session;

pub use error::CommandError;
pub use session::{DeliveryError, Role, SessionId};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use crate::auth::AuthVerifier;
use crate::chess::{Game, Move};
use crate::config::ServerConfig;
use crate::directory::MatchDirectory;
use crate::protocol::ServerMessage;
use crate::storage::GameStore;

use registry::{MatchEntry, MatchRegistry};
use session::Session;

/// The outcome of a successful CONNECT.
#[derive(Debug, Clone, Copy)]
pub struct ConnectedSession {
    /// Identifier the transport uses for follow-up commands.
    pub session_id: SessionId,
    /// Role resolved against the match's recorded seats.
    pub role: Role,
}

/// Multiplexes live connections across concurrently active matches.
///
/// Owns the match registry and the collaborator handles; every public
/// method is one inbound command. Failures are returned to the caller
/// for delivery to the originating session only — no failure here ever
/// touches another session or another match.
pub struct Coordinator {
    registry: MatchRegistry,
    auth: Arc<dyn AuthVerifier>,
    directory: Arc<dyn MatchDirectory>,
    store: Arc<dyn GameStore>,
    send_timeout: Duration,
    channel_capacity: usize,
    next_session_id: AtomicU64,
}

impl Coordinator {
    /// Creates a coordinator over the given collaborators.
    pub fn new(
        auth: Arc<dyn AuthVerifier>,
        directory: Arc<dyn MatchDirectory>,
        store: Arc<dyn GameStore>,
        config: &ServerConfig,
    ) -> Self {
        info!("creating coordinator");
        Self {
            registry: MatchRegistry::new(),
            auth,
            directory,
            store,
            send_timeout: config.send_timeout(),
            channel_capacity: *config.channel_capacity(),
            next_session_id: AtomicU64::new(1),
        }
    }

    /// Capacity the transport should give each session's outbound queue.
    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    /// Bound applied to every outbound send.
    pub fn send_timeout(&self) -> Duration {
        self.send_timeout
    }

    /// Handles CONNECT: authenticate, resolve the match and role,
    /// register the session, send it the current state, and notify the
    /// rest of the match.
    #[instrument(skip(self, token, outbound))]
    pub async fn connect(
        &self,
        token: &str,
        match_id: i64,
        outbound: mpsc::Sender<ServerMessage>,
    ) -> Result<ConnectedSession, CommandError> {
        let identity = self.auth.authenticate(token).await?;
        let meta = self.directory.lookup(match_id).await?;

        let entry = match self.registry.get(match_id) {
            Some(entry) => entry,
            None => {
                let game = match self.store.load(match_id).await {
                    Ok(Some(state)) => Game::from_state(state),
                    Ok(None) => Game::new(),
                    Err(err) => {
                        warn!(match_id, error = %err, "store load failed, starting fresh");
                        Game::new()
                    }
                };
                self.registry.get_or_insert_with(match_id, || game)
            }
        };

        let session_id = self.next_session_id.fetch_add(1, Ordering::Relaxed);
        let role = Role::from_seat(meta.seat_of(&identity));
        let session = Session::new(session_id, identity.clone(), role, outbound);

        let mut guard = entry.lock().await;
        if let Err(err) = session
            .send(ServerMessage::load_game(guard.game().state()), self.send_timeout)
            .await
        {
            warn!(session_id, error = %err, "failed to deliver initial game state");
        }
        guard.add_session(session);
        self.broadcast(
            &guard,
            ServerMessage::notification(format!("{identity} connected as {}", role.describe())),
            Some(session_id),
        )
        .await;

        info!(match_id, session_id, role = ?role, identity = %identity, "session connected");
        Ok(ConnectedSession { session_id, role })
    }

    /// Handles MAKE_MOVE: authorize against the sender's seat and the
    /// side to move, apply through the engine, then broadcast the new
    /// state, the move notification, and any check/checkmate/stalemate
    /// outcome for the opponent.
    #[instrument(skip(self, token, mv), fields(mv = %mv))]
    pub async fn make_move(
        &self,
        session_id: SessionId,
        token: &str,
        match_id: i64,
        mv: Move,
    ) -> Result<(), CommandError> {
        let identity = self.auth.authenticate(token).await?;
        let entry = self
            .registry
            .get(match_id)
            .ok_or(CommandError::GameNotFound { match_id })?;
        let mut guard = entry.lock().await;

        let role = self.sender_role(&guard, session_id, &identity)?;
        let Some(color) = role.color() else {
            return Err(CommandError::authorization("observers cannot make moves"));
        };
        if color != guard.game().to_move() {
            return Err(CommandError::authorization("it is not your turn"));
        }

        guard.game_mut().apply_move(mv)?;

        let state = guard.game().state().clone();
        if let Err(err) = self.store.save(match_id, &state).await {
            warn!(match_id, error = %err, "snapshot save failed");
        }

        self.broadcast(&guard, ServerMessage::load_game(&state), None).await;
        self.broadcast(
            &guard,
            ServerMessage::notification(format!("{identity} made a move: {mv}")),
            Some(session_id),
        )
        .await;

        let opponent = guard.game().to_move();
        if guard.game().is_in_checkmate(opponent) {
            self.broadcast(
                &guard,
                ServerMessage::notification(format!("Checkmate! {identity} has won!")),
                None,
            )
            .await;
        } else if guard.game().is_in_stalemate(opponent) {
            self.broadcast(
                &guard,
                ServerMessage::notification("Stalemate! The game is drawn."),
                None,
            )
            .await;
        } else if guard.game().is_in_check(opponent) {
            self.broadcast(
                &guard,
                ServerMessage::notification(format!("{opponent} is in check")),
                None,
            )
            .await;
        }

        Ok(())
    }

    /// Handles LEAVE: remove the session, vacate a held seat through the
    /// directory, and notify the remaining sessions. The caller closes
    /// the transport afterwards.
    #[instrument(skip(self, token))]
    pub async fn leave(
        &self,
        session_id: SessionId,
        token: &str,
        match_id: i64,
    ) -> Result<(), CommandError> {
        let identity = self.auth.authenticate(token).await?;
        let entry = self
            .registry
            .get(match_id)
            .ok_or(CommandError::GameNotFound { match_id })?;
        let mut guard = entry.lock().await;

        let role = self.sender_role(&guard, session_id, &identity)?;
        let removed = guard.remove_session(session_id);
        debug_assert!(removed.is_some());

        if role.color().is_some() {
            if let Err(err) = self.directory.vacate_seat(match_id, &identity).await {
                warn!(match_id, error = %err, "seat vacancy update failed");
            }
        }

        self.broadcast(
            &guard,
            ServerMessage::notification(format!("{identity} left the game")),
            None,
        )
        .await;

        info!(match_id, session_id, identity = %identity, "session left");
        Ok(())
    }

    /// Handles RESIGN: end the game and notify every session, including
    /// the resigner. The resigner's session stays registered; resigning
    /// is not leaving.
    #[instrument(skip(self, token))]
    pub async fn resign(
        &self,
        session_id: SessionId,
        token: &str,
        match_id: i64,
    ) -> Result<(), CommandError> {
        let identity = self.auth.authenticate(token).await?;
        let entry = self
            .registry
            .get(match_id)
            .ok_or(CommandError::GameNotFound { match_id })?;
        let mut guard = entry.lock().await;

        let role = self.sender_role(&guard, session_id, &identity)?;
        if role.color().is_none() {
            return Err(CommandError::authorization("observers cannot resign"));
        }

        guard.game_mut().resign();
        let state = guard.game().state().clone();
        if let Err(err) = self.store.save(match_id, &state).await {
            warn!(match_id, error = %err, "snapshot save failed");
        }

        self.broadcast(
            &guard,
            ServerMessage::notification(format!("{identity} resigned the game")),
            None,
        )
        .await;

        info!(match_id, session_id, identity = %identity, "player resigned");
        Ok(())
    }

    /// Handles a transport-level disconnect: the session is removed and
    /// the remaining sessions notified, but a held seat stays recorded so
    /// the player can reconnect into their color.
    #[instrument(skip(self))]
    pub async fn disconnect(&self, session_id: SessionId, match_id: i64) {
        let Some(entry) = self.registry.get(match_id) else {
            return;
        };
        let mut guard = entry.lock().await;
        let Some(session) = guard.remove_session(session_id) else {
            return;
        };

        info!(match_id, session_id, identity = %session.identity(), "session disconnected");
        self.broadcast(
            &guard,
            ServerMessage::notification(format!("{} left the game", session.identity())),
            None,
        )
        .await;
    }

    /// Number of sessions currently registered for a match.
    pub async fn session_count(&self, match_id: i64) -> usize {
        match self.registry.get(match_id) {
            Some(entry) => entry.lock().await.session_count(),
            None => 0,
        }
    }

    /// Validates that `session_id` is registered in this match under the
    /// authenticated identity, and returns its role.
    fn sender_role(
        &self,
        guard: &MatchEntry,
        session_id: SessionId,
        identity: &str,
    ) -> Result<Role, CommandError> {
        match guard.session(session_id) {
            Some(session) if session.identity() == identity => Ok(session.role()),
            Some(_) => Err(CommandError::authorization(
                "token does not match this session",
            )),
            None => Err(CommandError::authorization(
                "you are not connected to this game",
            )),
        }
    }

    /// Fans a message out to every session of a match, minus an optional
    /// exclusion. Delivery is best-effort per recipient: one failed or
    /// timed-out send is logged and affects nobody else.
    async fn broadcast(
        &self,
        guard: &MatchEntry,
        message: ServerMessage,
        exclude: Option<SessionId>,
    ) {
        for session in guard.sessions() {
            if Some(session.id()) == exclude {
                continue;
            }
            if let Err(err) = session.send(message.clone(), self.send_timeout).await {
                warn!(
                    session_id = session.id(),
                    error = %err,
                    "dropping undeliverable message"
                );
            }
        }
    }
}
