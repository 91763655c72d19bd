//! Card entity identification.
//!
//! Every physical card instance in a game has a unique `EntityId`. The id is
//! the only handle other cards keep on it: attachments, duplicates and
//! stealth targets all refer to each other by id, never by ownership.
//!
//! ```
//! use drawcard_engine::core::{EntityId, EntityIdAllocator};
//!
//! let mut ids = EntityIdAllocator::new();
//! let first = ids.next_id();
//! let second = ids.next_id();
//!
//! assert_ne!(first, second);
//! assert_eq!(first, EntityId(1));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// Hands out fresh entity ids, starting at 1.
///
/// Id 0 is never allocated so it can be used as a sentinel in serialized
/// client payloads.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntityIdAllocator {
    last: u32,
}

impl EntityIdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> EntityId {
        self.last += 1;
        EntityId(self.last)
    }

    /// Make sure future ids are allocated above `id`.
    ///
    /// Used when entities are restored from a snapshot.
    pub fn reserve(&mut self, id: EntityId) {
        self.last = self.last.max(id.0);
    }
}
