//! Bundled core set scripts and printed data.

use std::sync::Arc;

use super::registry::CardAbilities;
use crate::cards::CardData;
use crate::core::Result;

mod tywin_lannister;

pub use tywin_lannister::TywinLannister;

const CARDS_JSON: &str = include_str!("cards.json");

/// Every bundled ability script.
#[must_use]
pub fn scripts() -> Vec<Arc<dyn CardAbilities>> {
    vec![Arc::new(TywinLannister)]
}

/// Printed data for the bundled cards.
pub fn card_data() -> Result<Vec<CardData>> {
    Ok(serde_json::from_str(CARDS_JSON)?)
}

/// Printed data for one bundled card.
pub fn find(code: &str) -> Result<Option<CardData>> {
    Ok(card_data()?.into_iter().find(|data| data.code == code))
}
