//! Card system: printed data, the draw card entity, and the registry.
//!
//! ## Key Types
//!
//! - `CardData`: Printed card data shared by every copy of a card
//! - `BaseCard`: Identity, location, keywords, traits and tokens
//! - `DrawCard`: A card that can be in play, with strength, power and icons
//! - `CardRegistry`: Sole owner of every card entity
//! - `CardSnapshot` / `CardSummary`: Rollback copies and client views
//!
//! ## Relations
//!
//! Cards never own each other. A host records the ids of its attachments and
//! dupes, and a child records its host as `parent`; both sides resolve
//! through the registry.

mod base;
mod challenge;
mod definition;
mod icons;
mod instance;
mod registry;
mod relations;
mod snapshot;
mod strength;
mod summary;

pub use base::{AllowedAttachments, BaseCard};
pub use challenge::{ChallengeOptions, PlayAction};
pub use definition::{CardData, CardType, Location};
pub use icons::{Icon, IconList, Icons};
pub use instance::DrawCard;
pub use registry::CardRegistry;
pub use relations::Duplicate;
pub use snapshot::CardSnapshot;
pub use summary::{CardDetails, CardSummary};
