//! Chesshub library - a networked chess server.
//!
//! One authoritative game state per match, broadcast live to every
//! connected participant.
//!
//! # Architecture
//!
//! - **Chess engine**: board, per-piece move generation, legality
//!   filtering by simulation, and check/checkmate/stalemate detection.
//! - **Coordinator**: the session registry and broadcast hub. One engine
//!   per match id, one exclusive handling slot per match id, best-effort
//!   fan-out to every registered session.
//! - **Collaborator seams**: authentication, match metadata/seats, and
//!   game-state storage are traits with in-memory defaults; the real
//!   services live outside this crate.
//! - **Server**: a thin axum WebSocket route feeding the coordinator.
//!
//! Match state is in-memory only: nothing survives a process restart.
//! The [`storage::GameStore`] seam is where a durable variant plugs in.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod coordinator;
mod protocol;
mod server;

// Public modules - the engine and the collaborator seams
pub mod auth;
pub mod chess;
pub mod directory;
pub mod storage;

// Crate-level exports - configuration
pub use config::{ConfigError, MatchSeed, ServerConfig, TokenSeed};

// Crate-level exports - coordinator
pub use coordinator::{CommandError, ConnectedSession, Coordinator, DeliveryError, Role, SessionId};

// Crate-level exports - wire protocol
pub use protocol::{ClientCommand, ServerMessage};

// Crate-level exports - transport surface
pub use server::{router, serve};
