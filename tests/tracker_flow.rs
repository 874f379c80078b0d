mod common;

use chrono::{TimeZone, Utc};
use common::{at, open_memory, utc_options};
use credit_tracker::{
    core::{CalendarZone, CreditTracker, FixedClock, SessionOptions},
    core::services::CreditDraft,
    domain::{CardPreset, CreditCategory},
    storage::MemoryStorage,
    TrackerError,
};

#[test]
fn first_launch_seeds_amex_gold() {
    let storage = MemoryStorage::new();
    let (tracker, report) = open_memory(&storage, at(2025, 1, 15));

    assert!(report.fresh);
    assert!(report.seeded.is_some());
    let cards = tracker.list_cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "Amex Gold");
    assert_eq!(cards[0].issuer, "American Express");

    let summary = tracker.card_summary(cards[0].id).unwrap();
    assert_eq!(summary.total_count, 3);
    assert!((summary.total_monthly_value - 27.0).abs() < 1e-9);

    let names: Vec<String> = tracker
        .credits(cards[0].id)
        .unwrap()
        .iter()
        .map(|credit| format!("{} {}", credit.name, credit.amount))
        .collect();
    assert_eq!(names, vec!["Uber Cash 10", "Dining Credit 10", "Dunkin' Credit 7"]);
    assert!(storage.snapshot().unwrap().is_some());
}

#[test]
fn seeding_does_not_repeat_while_cards_exist() {
    let storage = MemoryStorage::new();
    let (mut tracker, _) = open_memory(&storage, at(2025, 1, 15));
    tracker.create_card("Sapphire", "Chase").unwrap();
    drop(tracker);

    let (tracker, report) = open_memory(&storage, at(2025, 1, 20));
    assert!(!report.fresh);
    assert!(report.seeded.is_none());
    assert_eq!(tracker.list_cards().len(), 2);
}

#[test]
fn empty_wallet_at_launch_is_seeded_again() {
    let storage = MemoryStorage::new();
    let (mut tracker, _) = open_memory(&storage, at(2025, 1, 15));
    let card_id = tracker.list_cards()[0].id;
    tracker.delete_card(card_id).unwrap();
    // Deleting every card mid-session does not reseed.
    assert!(tracker.list_cards().is_empty());
    drop(tracker);

    let (tracker, report) = open_memory(&storage, at(2025, 1, 16));
    assert!(report.seeded.is_some());
    assert_eq!(tracker.list_cards().len(), 1);
}

#[test]
fn seeding_can_be_disabled() {
    let storage = MemoryStorage::new();
    let options = SessionOptions {
        seed_sample_card: false,
        ..utc_options()
    };
    let (tracker, report) = CreditTracker::open(
        Box::new(storage),
        Box::new(FixedClock(at(2025, 1, 1))),
        options,
    )
    .unwrap();
    assert!(report.seeded.is_none());
    assert!(tracker.list_cards().is_empty());
}

#[test]
fn relaunch_in_new_month_clears_used_flags() {
    let storage = MemoryStorage::new();
    let (mut tracker, _) = open_memory(&storage, at(2025, 1, 15));
    let card_id = tracker.list_cards()[0].id;
    let credit_ids = tracker.card(card_id).unwrap().credit_ids.clone();
    for id in &credit_ids {
        assert!(tracker.toggle_credit(*id).unwrap());
    }
    assert_eq!(tracker.card_summary(card_id).unwrap().unused_count, 0);
    drop(tracker);

    let (same_month, report) = open_memory(&storage, at(2025, 1, 31));
    assert!(!report.reset.changed());
    assert_eq!(same_month.card_summary(card_id).unwrap().unused_count, 0);
    drop(same_month);

    let (next_month, report) = open_memory(&storage, at(2025, 2, 1));
    assert_eq!(report.reset.reset.len(), 3);
    let summary = next_month.card_summary(card_id).unwrap();
    assert_eq!(summary.unused_count, 3);
    assert_eq!(summary.used_value, 0.0);
    for credit in next_month.credits(card_id).unwrap() {
        assert_eq!(credit.last_reset, at(2025, 2, 1));
    }
}

#[test]
fn credit_lifecycle_persists_each_step() {
    let storage = MemoryStorage::new();
    let (mut tracker, _) = open_memory(&storage, at(2025, 3, 3));
    let saves_after_open = storage.save_count().unwrap();

    let card = tracker
        .create_card_from_preset(CardPreset::AmexPlatinum)
        .unwrap();
    let credit = tracker
        .add_credit(
            card.id,
            CreditDraft::new("Digital Entertainment", "20").category(CreditCategory::Streaming),
        )
        .unwrap();
    tracker.toggle_credit(credit.id).unwrap();
    tracker.delete_credit(card.id, credit.id).unwrap();
    assert_eq!(storage.save_count().unwrap(), saves_after_open + 4);

    let persisted = storage.snapshot().unwrap().unwrap();
    assert!(persisted.credit(credit.id).is_none());
    assert!(persisted.card(card.id).unwrap().credit_ids.is_empty());
}

#[test]
fn validation_errors_do_not_persist() {
    let storage = MemoryStorage::new();
    let (mut tracker, _) = open_memory(&storage, at(2025, 3, 3));
    let card_id = tracker.list_cards()[0].id;
    let saves = storage.save_count().unwrap();

    let err = tracker
        .add_credit(card_id, CreditDraft::new("", "10"))
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));
    let err = tracker
        .add_credit(card_id, CreditDraft::new("Uber", "abc"))
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));
    let err = tracker.create_card("Gold", "").unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));

    assert_eq!(storage.save_count().unwrap(), saves);
    assert_eq!(tracker.card_summary(card_id).unwrap().total_count, 3);
}

#[test]
fn delete_card_cascades_to_its_credits() {
    let storage = MemoryStorage::new();
    let (mut tracker, _) = open_memory(&storage, at(2025, 4, 1));
    let gold = tracker.list_cards()[0].id;
    let other = tracker.create_card("Reserve", "Chase").unwrap();
    tracker
        .add_credit(other.id, CreditDraft::new("Travel", "300"))
        .unwrap();

    tracker.delete_card(gold).unwrap();
    let wallet = tracker.wallet();
    assert!(wallet.credits.iter().all(|credit| credit.card_id != gold));
    assert_eq!(wallet.credits.len(), 1);

    let persisted = storage.snapshot().unwrap().unwrap();
    assert!(persisted.credits.iter().all(|credit| credit.card_id != gold));

    let err = tracker.delete_card(gold).unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(_)));
}

#[test]
fn portfolio_reflects_all_cards() {
    let storage = MemoryStorage::new();
    let (mut tracker, _) = open_memory(&storage, at(2025, 4, 1));
    let gold = tracker.list_cards()[0].id;
    let uber = tracker.card(gold).unwrap().credit_ids[0];
    tracker.toggle_credit(uber).unwrap();

    let totals = tracker.portfolio();
    assert_eq!(totals.card_count, 1);
    assert_eq!(totals.unused_count, 2);
    assert!((totals.used_value - 10.0).abs() < 1e-9);
    assert!((totals.remaining_value - 17.0).abs() < 1e-9);
    assert_eq!(tracker.card_summaries().len(), 1);
}

#[test]
fn saving_a_preset_name_brings_its_credits() {
    let storage = MemoryStorage::new();
    let (mut tracker, _) = open_memory(&storage, at(2025, 3, 3));

    let gold = tracker.save_card("Amex Gold", "Amex").unwrap();
    assert_eq!(gold.issuer, "Amex");
    let bundled: Vec<(String, CreditCategory)> = tracker
        .credits(gold.id)
        .unwrap()
        .iter()
        .map(|credit| (credit.name.clone(), credit.category))
        .collect();
    assert_eq!(
        bundled,
        vec![
            ("Uber Cash".to_string(), CreditCategory::Transportation),
            ("Dining Credit".to_string(), CreditCategory::Dining),
            ("Dunkin' Credit".to_string(), CreditCategory::Dining),
        ]
    );

    let freedom = tracker.save_card("Freedom Flex", "Chase").unwrap();
    assert!(tracker.credits(freedom.id).unwrap().is_empty());
    let platinum = tracker.save_card("Amex Platinum", "American Express").unwrap();
    assert!(tracker.credits(platinum.id).unwrap().is_empty());

    let err = tracker.save_card("Amex Gold", " ").unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));
    assert_eq!(tracker.list_cards().len(), 4);
}

#[test]
fn wallet_timestamps_follow_the_session_clock() {
    let storage = MemoryStorage::new();
    let (tracker, _) = open_memory(&storage, at(2025, 1, 15));
    assert_eq!(tracker.wallet().created_at, at(2025, 1, 15));
    assert_eq!(tracker.wallet().updated_at, at(2025, 1, 15));
    drop(tracker);

    let (mut tracker, _) = open_memory(&storage, at(2025, 1, 20));
    assert_eq!(tracker.wallet().updated_at, at(2025, 1, 15));
    tracker.create_card("Venture X", "Capital One").unwrap();

    let saved = storage.snapshot().unwrap().unwrap();
    assert_eq!(saved.created_at, at(2025, 1, 15));
    assert_eq!(saved.updated_at, at(2025, 1, 20));
}

#[test]
fn used_flag_survives_daylight_saving_change_within_month() {
    let storage = MemoryStorage::new();
    let options = SessionOptions {
        zone: CalendarZone::Named(chrono_tz::Europe::Lisbon),
        seed_sample_card: true,
    };
    // Already October 1st in Lisbon summer time.
    let opened = Utc.with_ymd_and_hms(2025, 9, 30, 23, 30, 0).unwrap();
    let (mut tracker, _) = CreditTracker::open(
        Box::new(storage.clone()),
        Box::new(FixedClock(opened)),
        options,
    )
    .unwrap();
    let card_id = tracker.list_cards()[0].id;
    let uber = tracker.credits(card_id).unwrap()[0].id;
    assert!(tracker.toggle_credit(uber).unwrap());
    drop(tracker);

    let after_fallback = Utc.with_ymd_and_hms(2025, 10, 28, 12, 0, 0).unwrap();
    let (tracker, report) = CreditTracker::open(
        Box::new(storage.clone()),
        Box::new(FixedClock(after_fallback)),
        options,
    )
    .unwrap();
    assert!(!report.reset.changed());
    assert!(tracker.wallet().credit(uber).unwrap().used_this_month);
}
