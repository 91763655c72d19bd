//! Persistent effects.
//!
//! - `CardMatcher`: Opaque predicate choosing which cards an effect touches
//! - `EffectKind`: What the effect does, with an exact inverse
//! - `PersistentEffect`: A kind bound to a source card and a matcher
//! - `EffectEngine`: Re-evaluates every effect and applies or unapplies it
//! - `AppliedEffects`: Effect records captured with a card snapshot
//!
//! Effects never cache derived values on the card. They adjust the inputs
//! (modifier, multiplier, override, icons, keywords) and let the attribute
//! engine derive the result.

mod effect;
mod engine;
mod matcher;

pub use effect::{DynamicValue, EffectCondition, EffectKind, PersistentEffect};
pub use engine::{AppliedEffects, EffectEngine, EffectId};
pub use matcher::{CardMatcher, MatchContext};
