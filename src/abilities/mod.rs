//! Card ability scripts.
//!
//! Cards share one entity type. What makes a card special lives in a
//! `CardAbilities` implementation looked up by card code when the card is
//! created. The script declares persistent effects and attachment
//! restrictions through an `AbilitySetup`; it never holds on to the card.

pub mod core_set;
mod registry;
mod setup;

pub use registry::{AbilityRegistry, CardAbilities};
pub use setup::AbilitySetup;
