//! Attachments and duplicates.
//!
//! Both are id relations into the card registry. The host records the ids;
//! the child records the host in `base.parent`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::base::AllowedAttachments;
use super::definition::{CardType, Location};
use super::instance::DrawCard;
use crate::core::{EntityId, PlayerId};
use crate::effects::{CardMatcher, MatchContext};

/// An entry in the duplicate pile.
///
/// The owner of a physical card never changes, so it is recorded next to the
/// id for replacement lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duplicate {
    pub uuid: EntityId,
    pub owner: PlayerId,
}

impl DrawCard {
    // === Attachments ===

    /// Declare what this attachment may be placed on.
    ///
    /// Any one matching restriction is enough.
    pub fn attachment_restriction(&mut self, restrictions: impl IntoIterator<Item = CardMatcher>) {
        self.attachment_restrictions = Some(restrictions.into_iter().collect());
    }

    /// Restrictions in force: the declared ones, or "must be a character"
    /// for an attachment that declared none.
    #[must_use]
    pub fn attachment_restrictions(&self) -> Vec<CardMatcher> {
        match &self.attachment_restrictions {
            Some(declared) => declared.clone(),
            None if self.card_type() == CardType::Attachment => {
                vec![CardMatcher::card_type(CardType::Character)]
            }
            None => Vec::new(),
        }
    }

    /// Whether this attachment may be placed on `card` by `player`.
    #[must_use]
    pub fn can_attach(&self, player: PlayerId, card: Option<&DrawCard>) -> bool {
        let Some(card) = card else {
            return false;
        };
        if self.card_type() != CardType::Attachment {
            return false;
        }

        let ctx = MatchContext::for_player(player);
        self.attachment_restrictions()
            .iter()
            .any(|restriction| restriction.matches(card, &ctx))
    }

    /// The target's own "no attachments" rule.
    #[must_use]
    pub fn allow_attachment(&self, attachment: &DrawCard) -> bool {
        if self.is_blank() {
            return true;
        }

        match &self.base.allowed_attachments {
            AllowedAttachments::Any => true,
            AllowedAttachments::None => false,
            AllowedAttachments::Trait(name) => attachment.base.has_trait(name),
        }
    }

    /// Place `attachment` on this card.
    pub fn attach(&mut self, attachment: &mut DrawCard) {
        let uuid = attachment.uuid();
        if !self.attachments.contains(&uuid) {
            self.attachments.push_back(uuid);
        }
        attachment.base.move_to(Location::PlayArea, Some(self.uuid()));
        debug!(card = %self.uuid(), attachment = %uuid, "attached");
    }

    // === Duplicates ===

    /// Only the owner may stack duplicates under a card.
    #[must_use]
    pub fn can_be_duplicated(&self) -> bool {
        self.controller() == self.owner()
    }

    /// Stack `card` under this one. Does nothing if duplication is not allowed.
    pub fn add_duplicate(&mut self, card: &mut DrawCard) -> bool {
        if !self.can_be_duplicated() {
            debug!(card = %self.uuid(), "duplicate rejected, controller is not owner");
            return false;
        }

        self.dupes.push_back(Duplicate {
            uuid: card.uuid(),
            owner: card.owner(),
        });
        card.base.move_to(Location::Duplicate, Some(self.uuid()));
        true
    }

    /// Take a duplicate off the pile.
    ///
    /// Without `force` only a dupe owned by the current controller qualifies.
    /// With `force` the first dupe is taken regardless of owner. The caller
    /// handles moving the returned card.
    pub fn remove_duplicate(&mut self, force: bool) -> Option<EntityId> {
        let controller = self.controller();
        let index = if force {
            (!self.dupes.is_empty()).then_some(0)
        } else {
            self.dupes.iter().position(|d| d.owner == controller)
        };
        let index = index?;

        Some(self.dupes.remove(index).uuid)
    }

    /// Drop `card` from both the attachment and duplicate collections.
    pub fn remove_child_card(&mut self, card: EntityId) {
        self.attachments.retain(|&a| a != card);
        self.dupes.retain(|d| d.uuid != card);
    }
}
