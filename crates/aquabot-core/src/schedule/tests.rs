//! Tests for the schedule state container.

use jiff::civil::{date, Date};

use super::*;
use crate::{clock::ManualClock, models::UrgencyLevel};

fn item(plan_id: u64, day: u8, status: ScheduleStatus) -> ScheduleItem {
    ScheduleItem {
        plan_id,
        day: format!("Day {day}"),
        status,
        is_completed: status == ScheduleStatus::Complete,
        water_amount_liters: 10.0 * f64::from(day),
        water_amount_buckets: f64::from(day),
        urgency_level: UrgencyLevel::Medium,
        date: day_date(day),
        date_display: String::new(),
        instruction: format!("Water field on day {day}"),
        status_message: String::new(),
    }
}

fn day_date(day: u8) -> Date {
    date(2025, 6, i8::try_from(day).unwrap())
}

fn key(plan_id: u64, day: u8) -> ScheduleKey {
    ScheduleKey {
        plan_id,
        date: day_date(day),
    }
}

fn state() -> (ManualClock, ScheduleState) {
    let clock = ManualClock::new(Timestamp::from_second(1_750_000_000).unwrap());
    let state = ScheduleState::with_clock(Arc::new(clock.clone()));
    (clock, state)
}

#[test]
fn test_set_schedule_items_resets_flags() {
    let (clock, mut state) = state();
    state.set_loading();
    state.set_error("offline");
    assert_eq!(state.error(), Some("offline"));
    assert!(!state.is_loading());

    state.set_loading();
    state.set_schedule_items(vec![item(1, 1, ScheduleStatus::InProgress)]);

    assert!(!state.is_loading());
    assert_eq!(state.error(), None);
    assert_eq!(state.last_updated(), Some(clock.now()));
    assert_eq!(state.len(), 1);
}

#[test]
fn test_set_schedule_items_is_idempotent() {
    let (_clock, mut once) = state();
    let (_clock, mut twice) = state();
    let items = vec![
        item(1, 1, ScheduleStatus::Complete),
        item(1, 2, ScheduleStatus::InProgress),
    ];

    once.set_schedule_items(items.clone());
    twice.set_schedule_items(items.clone());
    twice.set_schedule_items(items);

    assert_eq!(once.items(), twice.items());
    assert_eq!(once.error(), twice.error());
    assert_eq!(once.is_loading(), twice.is_loading());
}

#[test]
fn test_second_replace_wins_without_merge() {
    let (_clock, mut state) = state();
    state.set_schedule_items(vec![
        item(1, 1, ScheduleStatus::Complete),
        item(1, 2, ScheduleStatus::InProgress),
        item(1, 3, ScheduleStatus::Locked),
    ]);
    let second = vec![item(2, 5, ScheduleStatus::Locked)];
    state.set_schedule_items(second.clone());

    assert_eq!(state.items(), second.as_slice());
}

#[test]
fn test_update_out_of_bounds_is_noop() {
    let (_clock, mut state) = state();
    state.set_schedule_items(vec![item(1, 1, ScheduleStatus::InProgress)]);
    let before = state.items().to_vec();
    let stamp = state.last_updated();

    assert!(!state.update_schedule_item(1, &SchedulePatch::complete()));
    assert!(!state.update_schedule_item(usize::MAX, &SchedulePatch::complete()));

    assert_eq!(state.items(), before.as_slice());
    assert_eq!(state.last_updated(), stamp);
}

#[test]
fn test_mark_second_item_complete() {
    let (_clock, mut state) = state();
    let locked = item(1, 1, ScheduleStatus::Locked);
    state.set_schedule_items(vec![locked.clone(), item(1, 2, ScheduleStatus::InProgress)]);

    assert!(state.update_schedule_item(1, &SchedulePatch::complete()));

    assert_eq!(state.items()[0], locked);
    assert_eq!(state.items()[1].status, ScheduleStatus::Complete);
    assert!(state.items()[1].is_completed);
}

#[test]
fn test_local_patch_lost_on_refetch() {
    let (_clock, mut state) = state();
    let server_copy = vec![item(1, 1, ScheduleStatus::InProgress)];
    state.set_schedule_items(server_copy.clone());
    state.update_schedule_item(0, &SchedulePatch::complete());

    state.set_schedule_items(server_copy.clone());
    assert_eq!(state.items(), server_copy.as_slice());
}

#[test]
fn test_update_by_key() {
    let (_clock, mut state) = state();
    state.set_schedule_items(vec![
        item(1, 1, ScheduleStatus::Expired),
        item(1, 2, ScheduleStatus::InProgress),
    ]);

    let patch = SchedulePatch {
        status_message: Some("Rain expected".to_string()),
        ..Default::default()
    };
    assert!(state.update_by_key(&key(1, 2), &patch));
    assert_eq!(state.items()[1].status_message, "Rain expected");
    assert!(!state.update_by_key(&key(9, 2), &patch));
}

#[test]
fn test_clear_schedule_items() {
    let (_clock, mut state) = state();
    state.set_schedule_items(vec![item(1, 1, ScheduleStatus::InProgress)]);
    state.clear_schedule_items();

    assert!(state.is_empty());
    assert_eq!(state.last_updated(), None);
}

#[test]
fn test_expand_rules() {
    let (_clock, mut state) = state();
    state.set_schedule_items(vec![
        item(1, 1, ScheduleStatus::Complete),
        item(1, 2, ScheduleStatus::InProgress),
        item(1, 3, ScheduleStatus::Locked),
    ]);

    assert!(state.can_expand(0));
    assert!(state.can_expand(1));
    assert!(!state.can_expand(2));
    assert!(!state.can_expand(3));
}

#[test]
fn test_begin_completion_validates_transition() {
    let (_clock, mut state) = state();
    state.set_schedule_items(vec![
        item(1, 1, ScheduleStatus::Expired),
        item(1, 2, ScheduleStatus::InProgress),
        item(1, 3, ScheduleStatus::Locked),
    ]);

    let ready = state.begin_completion(&key(1, 2)).expect("in progress item");
    assert_eq!(ready.day, "Day 2");
    assert!(state.can_complete(&key(1, 2)));

    match state.begin_completion(&key(1, 3)) {
        Err(AquaError::InvalidTransition { from, to }) => {
            assert_eq!(from, ScheduleStatus::Locked);
            assert_eq!(to, ScheduleStatus::Complete);
        }
        other => panic!("Expected InvalidTransition, got {other:?}"),
    }
    assert!(matches!(
        state.begin_completion(&key(1, 1)),
        Err(AquaError::InvalidTransition { .. })
    ));
    assert!(matches!(
        state.begin_completion(&key(4, 1)),
        Err(AquaError::ItemNotFound { plan_id: 4, .. })
    ));
}

#[test]
fn test_reconcile_applies_server_copy() {
    let (_clock, mut state) = state();
    state.set_schedule_items(vec![
        item(1, 1, ScheduleStatus::Complete),
        item(1, 2, ScheduleStatus::InProgress),
    ]);

    let mut server = item(1, 2, ScheduleStatus::Complete);
    server.status_message = "Completed at 06:10".to_string();
    assert!(state.reconcile(server.clone()));
    assert_eq!(state.items()[1], server);

    // A refetch replaced the list in the meantime
    state.set_schedule_items(vec![item(2, 1, ScheduleStatus::InProgress)]);
    assert!(!state.reconcile(server));
    assert_eq!(state.len(), 1);
}

#[test]
fn test_counts_and_current_item() {
    let (_clock, mut state) = state();
    assert_eq!(state.current_item(), None);

    state.set_schedule_items(vec![
        item(1, 1, ScheduleStatus::Complete),
        item(1, 2, ScheduleStatus::Expired),
        item(1, 3, ScheduleStatus::InProgress),
        item(1, 4, ScheduleStatus::Locked),
        item(2, 4, ScheduleStatus::Locked),
    ]);

    let counts = state.counts();
    assert_eq!(counts.complete, 1);
    assert_eq!(counts.expired, 1);
    assert_eq!(counts.in_progress, 1);
    assert_eq!(counts.locked, 2);
    assert_eq!(counts.total(), 5);
    assert_eq!(state.current_item().map(|i| i.day.as_str()), Some("Day 3"));
    assert_eq!(state.items_for_plan(2).count(), 1);
}
