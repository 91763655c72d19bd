//! Client-facing views of a card.

use serde::{Deserialize, Serialize};

use super::definition::{CardType, Location};
use super::icons::IconList;
use super::instance::DrawCard;
use super::registry::CardRegistry;
use crate::core::{CardError, EntityId, PlayerId, Result};
use crate::pipeline::GameView;

/// Observable state of a card, as sent to one player.
///
/// `details` is `None` when the card is hidden from that player; the
/// remaining fields are always visible.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSummary {
    pub uuid: EntityId,
    pub facedown: bool,
    pub location: Location,
    #[serde(flatten)]
    pub details: Option<CardDetails>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub owner: PlayerId,
    pub controller: PlayerId,
    pub new: bool,
    pub blank: bool,
    pub tokens: Vec<(String, u32)>,
    pub attached: bool,
    pub attachments: Vec<CardSummary>,
    pub base_strength: i32,
    pub dupes: Vec<CardSummary>,
    pub icons_added: IconList,
    pub icons_removed: IconList,
    pub in_challenge: bool,
    pub in_danger: bool,
    pub kneeled: bool,
    pub power: u32,
    pub saved: bool,
    pub strength: i32,
    pub stealth: bool,
}

impl CardSummary {
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.details.is_none()
    }
}

impl DrawCard {
    /// Whether `active_player` must not see this card's face.
    #[must_use]
    pub fn is_hidden_from(&self, active_player: PlayerId, hide_when_faceup: bool) -> bool {
        active_player != self.owner() && (self.base.facedown || hide_when_faceup)
    }

    /// Build the view of this card for `active_player`.
    ///
    /// Fails with `DupeHasDupes` if a card stacked under this one carries
    /// dupes of its own.
    pub fn summary<V: GameView + ?Sized>(
        &self,
        active_player: PlayerId,
        hide_when_faceup: bool,
        view: &V,
        cards: &CardRegistry,
    ) -> Result<CardSummary> {
        let mut summary = CardSummary {
            uuid: self.uuid(),
            facedown: self.base.facedown,
            location: self.location(),
            details: None,
        };

        if self.is_hidden_from(active_player, hide_when_faceup) {
            summary.facedown = true;
            return Ok(summary);
        }

        let attachments = self
            .attachments
            .iter()
            .map(|&id| cards.require(id)?.summary(active_player, hide_when_faceup, view, cards))
            .collect::<Result<Vec<_>>>()?;

        let dupes = self
            .dupes()
            .map(|id| {
                let dupe = cards.require(id)?;
                if dupe.dupe_count() != 0 {
                    tracing::warn!(card = %self.uuid(), dupe = %id, "dupe carries its own dupes");
                    return Err(CardError::DupeHasDupes {
                        name: dupe.name().to_string(),
                    });
                }
                dupe.summary(active_player, hide_when_faceup, view, cards)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut tokens: Vec<(String, u32)> = self
            .base
            .token_map()
            .iter()
            .map(|(name, &count)| (name.clone(), count))
            .collect();
        tokens.sort();

        summary.details = Some(CardDetails {
            code: self.code().to_string(),
            name: self.name().to_string(),
            card_type: self.card_type(),
            owner: self.owner(),
            controller: self.controller(),
            new: self.base.new,
            blank: self.is_blank(),
            tokens,
            attached: self.parent().is_some(),
            attachments,
            base_strength: self.printed_strength(),
            dupes,
            icons_added: self.icons_added(),
            icons_removed: self.icons_removed(),
            in_challenge: self.in_challenge,
            in_danger: self.in_danger,
            kneeled: self.kneeled,
            power: self.power(),
            saved: self.saved,
            strength: self.strength(view),
            stealth: self.stealth,
        });

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{CardData, Icon};
    use crate::core::Phase;
    use crate::pipeline::Pipeline;

    fn knight() -> Arc<CardData> {
        Arc::new(
            CardData::new("00001", "Knight", CardType::Character)
                .with_strength(3)
                .with_icons(true, false, false),
        )
    }

    fn pipeline() -> Pipeline {
        let mut pipeline = Pipeline::new(2);
        pipeline.set_phase_all(Phase::Challenge);
        pipeline
    }

    #[test]
    fn test_summary_reports_state() {
        let mut cards = CardRegistry::new();
        let id = cards.create(knight(), PlayerId::new(0));
        let card = cards.get_mut(id).unwrap();
        card.kneeled = true;
        card.power = 2;
        card.strength_modifier = 1;
        card.add_icon(Icon::Power);
        card.remove_icon(Icon::Military);

        let summary = cards
            .get(id)
            .unwrap()
            .summary(PlayerId::new(0), false, &pipeline(), &cards)
            .unwrap();
        let details = summary.details.unwrap();

        assert_eq!(details.strength, 4);
        assert_eq!(details.base_strength, 3);
        assert_eq!(details.power, 2);
        assert!(details.kneeled);
        assert!(!details.attached);
        assert_eq!(details.icons_added.as_slice(), &[Icon::Power]);
        assert_eq!(details.icons_removed.as_slice(), &[Icon::Military]);
    }

    #[test]
    fn test_summary_includes_children() {
        let mut cards = CardRegistry::new();
        let host = cards.create(knight(), PlayerId::new(0));
        let dupe = cards.create(knight(), PlayerId::new(0));
        cards.with_pair(host, dupe, |h, d| h.add_duplicate(d)).unwrap();

        let summary = cards
            .get(host)
            .unwrap()
            .summary(PlayerId::new(0), false, &pipeline(), &cards)
            .unwrap();
        let details = summary.details.unwrap();

        assert_eq!(details.dupes.len(), 1);
        assert_eq!(details.dupes[0].uuid, dupe);
        assert!(details.dupes[0].details.as_ref().unwrap().attached);
    }

    #[test]
    fn test_dupe_with_dupes_is_an_error() {
        let mut cards = CardRegistry::new();
        let host = cards.create(knight(), PlayerId::new(0));
        let dupe = cards.create(knight(), PlayerId::new(0));
        let nested = cards.create(knight(), PlayerId::new(0));
        cards.with_pair(host, dupe, |h, d| h.add_duplicate(d)).unwrap();
        cards.with_pair(dupe, nested, |d, n| d.add_duplicate(n)).unwrap();

        let result = cards
            .get(host)
            .unwrap()
            .summary(PlayerId::new(0), false, &pipeline(), &cards);

        match result {
            Err(CardError::DupeHasDupes { name }) => assert_eq!(name, "Knight"),
            other => panic!("expected DupeHasDupes, got {other:?}"),
        }
    }

    #[test]
    fn test_facedown_card_hidden_from_opponent() {
        let mut cards = CardRegistry::new();
        let id = cards.create(knight(), PlayerId::new(0));
        cards.get_mut(id).unwrap().base.facedown = true;
        let card = cards.get(id).unwrap();

        let theirs = card.summary(PlayerId::new(1), false, &pipeline(), &cards).unwrap();
        assert!(theirs.is_hidden());
        assert!(theirs.facedown);

        let mine = card.summary(PlayerId::new(0), false, &pipeline(), &cards).unwrap();
        assert!(!mine.is_hidden());
    }

    #[test]
    fn test_card_hidden_face_up_reports_facedown() {
        let mut cards = CardRegistry::new();
        let id = cards.create(knight(), PlayerId::new(0));
        let card = cards.get(id).unwrap();
        assert!(!card.base.facedown);

        let theirs = card.summary(PlayerId::new(1), true, &pipeline(), &cards).unwrap();
        assert!(theirs.is_hidden());
        assert!(theirs.facedown);

        let mine = card.summary(PlayerId::new(0), true, &pipeline(), &cards).unwrap();
        assert!(!mine.is_hidden());
        assert!(!mine.facedown);
    }

    #[test]
    fn test_hidden_summary_serializes_without_details() {
        let mut cards = CardRegistry::new();
        let id = cards.create(knight(), PlayerId::new(0));
        let card = cards.get(id).unwrap();

        let summary = card.summary(PlayerId::new(1), true, &pipeline(), &cards).unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["facedown"], true);
        assert!(json.get("strength").is_none());
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_summary_json_uses_camel_case() {
        let mut cards = CardRegistry::new();
        let id = cards.create(knight(), PlayerId::new(0));
        let card = cards.get(id).unwrap();

        let summary = card.summary(PlayerId::new(0), false, &pipeline(), &cards).unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["baseStrength"], 3);
        assert_eq!(json["inChallenge"], false);
        assert_eq!(json["type"], "character");
        assert!(json["iconsAdded"].as_array().unwrap().is_empty());
    }
}
