//! Pure, synchronous domain engine for the hex-grid strategy game.
//!
//! This crate contains no I/O and no async runtime dependency. It models the
//! board, troops, and turn-resolution rules as plain data and free functions,
//! so the same code path that runs inside the server's game controller can be
//! driven directly from unit tests.
//!
//! The seam mirrors the reference architecture's split between
//! `BackEndArchitecture` (pure game logic) and the networking middle layer:
//! everything here is the "backend"; the `server` crate is the middle layer
//! and transport.

pub mod accountant;
pub mod action;
pub mod board;
pub mod config;
pub mod control_score;
pub mod error;
pub mod event;
pub mod hex;
pub mod levelgen;
pub mod player;
pub mod status;
pub mod troop;
pub mod update;
pub mod updater;
pub mod validator;

pub use accountant::remaining_action_points;
pub use action::{GameAction, PlayerRequest};
pub use board::Board;
pub use config::GameConfig;
pub use control_score::CoreControlScore;
pub use error::GameCoreError;
pub use event::Event;
pub use hex::HexCoord;
pub use player::{Player, PlayerId, PlayerOrder};
pub use status::GameStatus;
pub use troop::{Troop, TroopKind};
pub use update::Update;
pub use updater::update;
pub use validator::is_valid;
