//! Core engine types: entity ids, players, phases, configuration, errors.
//!
//! Everything in here is independent of card rules. The `cards`, `effects`
//! and `pipeline` modules build on these types.

pub mod config;
pub mod entity;
pub mod error;
pub mod player;

pub use config::{GameConfig, Phase};
pub use entity::{EntityId, EntityIdAllocator};
pub use error::{CardError, Result};
pub use player::{PlayerId, PlayerMap};
