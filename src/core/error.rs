//! Error types for the card engine.
//!
//! Only internal consistency violations surface as errors. Routine rule
//! checks ("can this attach?", "can this be duplicated?") answer `false` or
//! do nothing instead.

use thiserror::Error;

use super::entity::EntityId;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("A dupe should not have dupes! {name}")]
    DupeHasDupes { name: String },

    #[error("Card not found: {0}")]
    UnknownCard(EntityId),

    #[error("Card already registered: {0}")]
    AlreadyRegistered(EntityId),

    #[error("No abilities registered for card code {0}")]
    UnknownAbility(String),

    #[error("Abilities already registered for card code {0}")]
    DuplicateAbility(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid card data: {0}")]
    CardData(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CardError>;
