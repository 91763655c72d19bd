//! # drawcard-engine
//!
//! The draw card entity of a turn-based card game and the engine around it:
//! derived strength and power, icons, attachments and duplicates, challenge
//! eligibility and stealth, persistent effects and per-card ability scripts.
//!
//! ## Design Principles
//!
//! 1. **Registry Owns Cards**: Cards refer to each other by `EntityId`. The
//!    `CardRegistry` is the only owner, so attachments, dupes and parents
//!    are plain relations.
//!
//! 2. **Derived, Not Cached**: Strength is computed from printed value,
//!    modifier, multiplier and override on every read. Effects adjust the
//!    inputs and are reapplied on demand.
//!
//! 3. **Explicit Deferral**: Follow-up work (kills, burn, win checks) is
//!    queued as data and drained in FIFO order by `Game::resolve`.
//!
//! 4. **Persistent Data Structures**: Card collections use `im` so a
//!    snapshot is a cheap clone that shares memory until mutated.
//!
//! ## Modules
//!
//! - `core`: Entity ids, players, phases, configuration, errors
//! - `cards`: Printed data, the `DrawCard` entity, registry, snapshot, summary
//! - `effects`: Matchers, persistent effects and the effect engine
//! - `abilities`: Ability scripts keyed by card code
//! - `pipeline`: Events, game actions, the step queue and `GameHooks`
//! - `game`: The facade tying everything together
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use drawcard_engine::{CardData, CardType, Game, GameConfig, Phase, PlayerId};
//!
//! let mut game = Game::new(GameConfig::default()).unwrap();
//! game.set_phase(Phase::Challenge).unwrap();
//!
//! let data = Arc::new(CardData::new("00001", "Knight", CardType::Character).with_strength(3));
//! let knight = game.create_card(data, PlayerId::new(0)).unwrap();
//! game.put_into_play(knight).unwrap();
//! game.modify_strength(knight, 2).unwrap();
//!
//! assert_eq!(game.strength(knight).unwrap(), 5);
//! ```

pub mod abilities;
pub mod cards;
pub mod core;
pub mod effects;
pub mod game;
pub mod pipeline;

// Re-export commonly used types
pub use crate::core::{CardError, EntityId, GameConfig, Phase, PlayerId, PlayerMap, Result};

pub use crate::cards::{
    CardData, CardRegistry, CardSnapshot, CardSummary, CardType, DrawCard, Icon, Location,
};

pub use crate::effects::{CardMatcher, EffectEngine, EffectKind, MatchContext, PersistentEffect};

pub use crate::abilities::{AbilityRegistry, CardAbilities};

pub use crate::pipeline::{GameAction, GameEvent, GameHooks, GameView, KillOptions, Pipeline};

pub use crate::game::{Checkpoint, Game};
