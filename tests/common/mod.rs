//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use drawcard_engine::cards::{CardData, CardRegistry, CardType, Location};
use drawcard_engine::core::{EntityId, Phase, PlayerId};
use drawcard_engine::pipeline::Pipeline;
use tracing_subscriber::EnvFilter;

/// Route engine logs to the test writer. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn character(name: &str, strength: i32) -> Arc<CardData> {
    Arc::new(
        CardData::new("00001", name, CardType::Character)
            .with_strength(strength)
            .with_icons(true, true, false),
    )
}

pub fn attachment(name: &str) -> Arc<CardData> {
    Arc::new(CardData::new("00002", name, CardType::Attachment))
}

pub fn location(name: &str) -> Arc<CardData> {
    Arc::new(CardData::new("00003", name, CardType::Location))
}

/// Two-player pipeline already past setup.
pub fn pipeline(phase: Phase) -> Pipeline {
    let mut pipeline = Pipeline::new(2);
    pipeline.set_phase_all(phase);
    pipeline
}

/// Create a card straight into the play area.
pub fn in_play(cards: &mut CardRegistry, data: Arc<CardData>, owner: u8) -> EntityId {
    let id = cards.create(data, PlayerId::new(owner));
    cards
        .get_mut(id)
        .expect("just created")
        .base
        .move_to(Location::PlayArea, None);
    id
}
