//! Attachments, duplicates, stealth and client summaries.

mod common;

use drawcard_engine::cards::{AllowedAttachments, CardRegistry, CardType, Location};
use drawcard_engine::core::{CardError, Phase, PlayerId};
use drawcard_engine::effects::CardMatcher;
use drawcard_engine::pipeline::GameAction;

use common::{attachment, character, in_play, location, pipeline};

#[test]
fn test_default_attachment_restriction_is_characters() {
    let mut cards = CardRegistry::new();
    let sword = cards.create(attachment("Sword"), PlayerId::new(0));
    let knight = in_play(&mut cards, character("Knight", 2), 0);
    let keep = in_play(&mut cards, location("Keep"), 0);
    let cloak = in_play(&mut cards, attachment("Cloak"), 0);

    let sword = cards.get(sword).unwrap();
    assert!(sword.can_attach(PlayerId::new(0), cards.get(knight)));
    assert!(sword.can_attach(PlayerId::new(1), cards.get(knight)));
    assert!(!sword.can_attach(PlayerId::new(0), cards.get(keep)));
    assert!(!sword.can_attach(PlayerId::new(0), cards.get(cloak)));
    assert!(!sword.can_attach(PlayerId::new(0), None));
}

#[test]
fn test_declared_restrictions_are_any_of() {
    let mut cards = CardRegistry::new();
    let banner = cards.create(attachment("Banner"), PlayerId::new(0));
    let knight = in_play(&mut cards, character("Knight", 2), 0);
    let enemy = in_play(&mut cards, character("Raider", 2), 1);
    let keep = in_play(&mut cards, location("Keep"), 0);

    cards.get_mut(banner).unwrap().attachment_restriction([
        CardMatcher::new(|card, ctx| {
            card.card_type() == CardType::Character && ctx.player == Some(card.controller())
        }),
        CardMatcher::card_type(CardType::Location),
    ]);

    let banner = cards.get(banner).unwrap();
    assert!(banner.can_attach(PlayerId::new(0), cards.get(knight)));
    assert!(!banner.can_attach(PlayerId::new(0), cards.get(enemy)));
    assert!(banner.can_attach(PlayerId::new(0), cards.get(keep)));
}

#[test]
fn test_non_attachment_cannot_attach() {
    let mut cards = CardRegistry::new();
    let squire = cards.create(character("Squire", 1), PlayerId::new(0));
    let knight = in_play(&mut cards, character("Knight", 2), 0);

    assert!(!cards.get(squire).unwrap().can_attach(PlayerId::new(0), cards.get(knight)));
}

#[test]
fn test_allowed_attachments_on_target() {
    let mut cards = CardRegistry::new();
    let knight = in_play(&mut cards, character("Knight", 2), 0);
    let sword = cards.create(attachment("Sword"), PlayerId::new(0));

    let host = cards.get_mut(knight).unwrap();
    host.base.allowed_attachments = AllowedAttachments::Trait("Weapon".to_string());
    let host = cards.get(knight).unwrap();
    assert!(!host.allow_attachment(cards.get(sword).unwrap()));

    cards.get_mut(sword).unwrap().base.add_trait("Weapon");
    let host = cards.get(knight).unwrap();
    assert!(host.allow_attachment(cards.get(sword).unwrap()));

    cards.get_mut(knight).unwrap().base.allowed_attachments = AllowedAttachments::None;
    let host = cards.get(knight).unwrap();
    assert!(!host.allow_attachment(cards.get(sword).unwrap()));

    cards.get_mut(knight).unwrap().base.set_blank();
    let host = cards.get(knight).unwrap();
    assert!(host.allow_attachment(cards.get(sword).unwrap()));
}

#[test]
fn test_duplicate_rejected_after_takeover() {
    let mut cards = CardRegistry::new();
    let knight = in_play(&mut cards, character("Knight", 2), 0);
    let dupe = cards.create(character("Knight", 2), PlayerId::new(0));
    cards.get_mut(knight).unwrap().set_controller(PlayerId::new(1));

    let added = cards.with_pair(knight, dupe, |host, d| host.add_duplicate(d)).unwrap();

    assert!(!added);
    assert_eq!(cards.get(knight).unwrap().dupe_count(), 0);
    let dupe = cards.get(dupe).unwrap();
    assert_eq!(dupe.location(), Location::DrawDeck);
    assert_eq!(dupe.parent(), None);
}

#[test]
fn test_remove_duplicate_prefers_controller_unless_forced() {
    let mut cards = CardRegistry::new();
    let knight = in_play(&mut cards, character("Knight", 2), 0);
    let theirs = cards.create(character("Knight", 2), PlayerId::new(1));
    let mine = cards.create(character("Knight", 2), PlayerId::new(0));

    // An opponent-owned copy sits first in the pile.
    cards.with_pair(knight, theirs, |host, d| host.add_duplicate(d)).unwrap();
    cards.with_pair(knight, mine, |host, d| host.add_duplicate(d)).unwrap();
    assert_eq!(cards.get(knight).unwrap().dupes().collect::<Vec<_>>(), vec![theirs, mine]);

    let host = cards.get_mut(knight).unwrap();
    assert_eq!(host.remove_duplicate(false), Some(mine));
    assert_eq!(host.remove_duplicate(false), None);
    assert_eq!(host.remove_duplicate(true), Some(theirs));
    assert_eq!(host.remove_duplicate(true), None);
}

#[test]
fn test_remove_child_card_is_idempotent() {
    let mut cards = CardRegistry::new();
    let knight = in_play(&mut cards, character("Knight", 2), 0);
    let sword = cards.create(attachment("Sword"), PlayerId::new(0));
    cards.with_pair(knight, sword, |host, a| host.attach(a)).unwrap();

    let host = cards.get_mut(knight).unwrap();
    host.remove_child_card(sword);
    host.remove_child_card(sword);
    assert!(host.attachments().is_empty());
}

#[test]
fn test_stealth_bypass() {
    let mut cards = CardRegistry::new();
    let spy = in_play(&mut cards, character("Spy", 2), 0);
    let guard = in_play(&mut cards, character("Guard", 2), 1);
    let watcher = in_play(&mut cards, character("Watcher", 2), 1);

    cards.get_mut(spy).unwrap().base.add_keyword("Stealth");
    assert!(cards.get(spy).unwrap().needs_stealth_target());

    cards.get_mut(watcher).unwrap().base.add_restriction(GameAction::BypassByStealth);
    let blocked = cards.with_pair(spy, watcher, |s, t| s.use_stealth_to_bypass(t)).unwrap();
    assert!(!blocked);
    assert!(!cards.get(watcher).unwrap().stealth);

    let bypassed = cards.with_pair(spy, guard, |s, t| s.use_stealth_to_bypass(t)).unwrap();
    assert!(bypassed);
    assert!(cards.get(guard).unwrap().stealth);
    assert_eq!(cards.get(spy).unwrap().stealth_target, Some(guard));
    assert!(!cards.get(spy).unwrap().needs_stealth_target());
    assert!(!cards.get(guard).unwrap().can_declare_as_defender(drawcard_engine::cards::Icon::Military));
}

#[test]
fn test_summary_fails_when_dupe_has_dupes() {
    let mut cards = CardRegistry::new();
    let hooks = pipeline(Phase::Challenge);
    let knight = in_play(&mut cards, character("Knight", 2), 0);
    let dupe = cards.create(character("Knight", 2), PlayerId::new(0));
    let nested = cards.create(character("Knight", 2), PlayerId::new(0));
    cards.with_pair(knight, dupe, |host, d| host.add_duplicate(d)).unwrap();

    assert!(cards.get(knight).unwrap().summary(PlayerId::new(0), false, &hooks, &cards).is_ok());

    cards.with_pair(dupe, nested, |d, n| d.add_duplicate(n)).unwrap();
    let err = cards
        .get(knight)
        .unwrap()
        .summary(PlayerId::new(0), false, &hooks, &cards)
        .unwrap_err();

    assert!(matches!(err, CardError::DupeHasDupes { .. }));
    assert_eq!(err.to_string(), "A dupe should not have dupes! Knight");
}

#[test]
fn test_summary_nests_attachments() {
    let mut cards = CardRegistry::new();
    let hooks = pipeline(Phase::Challenge);
    let knight = in_play(&mut cards, character("Knight", 2), 0);
    let sword = cards.create(attachment("Sword"), PlayerId::new(0));
    cards.with_pair(knight, sword, |host, a| host.attach(a)).unwrap();

    let summary = cards.get(knight).unwrap().summary(PlayerId::new(1), false, &hooks, &cards).unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["attachments"][0]["name"], "Sword");
    assert_eq!(json["attachments"][0]["attached"], true);
    assert_eq!(json["attached"], false);
    assert_eq!(json["location"], "play-area");
}
