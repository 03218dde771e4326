mod common;

use std::sync::Arc;

use aquabot_core::{
    cache::PLANS_KEY,
    models::{ChatRole, ScheduleStatus},
    AquaError, Dashboard, PanelView, ScheduleState,
};
use common::{create_test_app, plan, start_time, FakeBackend};
use jiff::SignedDuration;

#[tokio::test]
async fn test_plans_are_served_from_cache_within_ttl() {
    let backend = FakeBackend::with_plans(vec![plan(1), plan(2)]);
    let (app, store, clock) = create_test_app(backend.clone()).await;

    let first = app.irrigation_plans(false).await.expect("Failed to fetch plans");
    assert!(!first.from_cache);
    assert_eq!(first.plans.len(), 2);
    assert_eq!(first.fetched_at, start_time());
    assert!(store.contains(PLANS_KEY));

    clock.advance(SignedDuration::from_hours(23));
    let second = app.irrigation_plans(false).await.expect("Failed to load plans");
    assert!(second.from_cache);
    assert_eq!(second.plans, first.plans);
    assert_eq!(second.fetched_at, start_time());
    assert_eq!(backend.plan_fetches(), 1);
}

#[tokio::test]
async fn test_stale_cache_triggers_refetch() {
    let backend = FakeBackend::with_plans(vec![plan(1)]);
    let (app, _store, clock) = create_test_app(backend.clone()).await;

    app.irrigation_plans(false).await.expect("Failed to fetch plans");
    clock.advance(SignedDuration::from_hours(25));

    let view = app.irrigation_plans(false).await.expect("Failed to refetch plans");
    assert!(!view.from_cache);
    assert_eq!(backend.plan_fetches(), 2);
}

#[tokio::test]
async fn test_refresh_bypasses_cache() {
    let backend = FakeBackend::with_plans(vec![plan(1)]);
    let (app, _store, _clock) = create_test_app(backend.clone()).await;

    app.irrigation_plans(false).await.expect("Failed to fetch plans");
    backend.plans.lock().unwrap().push(plan(2));

    let view = app.irrigation_plans(true).await.expect("Failed to refresh plans");
    assert!(!view.from_cache);
    assert_eq!(view.plans.len(), 2);
    assert_eq!(backend.plan_fetches(), 2);
}

#[tokio::test]
async fn test_unreadable_session_is_unauthenticated() {
    let backend = FakeBackend::with_plans(vec![plan(1)]);
    let (app, store, _clock) = create_test_app(backend).await;

    let user = app.current_user().await.expect("Session missing");
    assert_eq!(user.id, common::USER_ID);

    store.set_failing(true);
    let result = app.irrigation_plans(false).await;
    assert!(matches!(result, Err(AquaError::Unauthenticated)));

    store.set_failing(false);
    let view = app.irrigation_plans(false).await.expect("Failed to fetch plans");
    assert_eq!(view.plans.len(), 1);
}

#[tokio::test]
async fn test_plans_require_login() {
    let backend = FakeBackend::with_plans(vec![plan(1)]);
    let (app, _store, _clock) = create_test_app(backend.clone()).await;
    app.session().clear().await.expect("Failed to clear session");

    let result = app.irrigation_plans(false).await;
    assert!(matches!(result, Err(AquaError::Unauthenticated)));
    assert_eq!(backend.plan_fetches(), 0);
}

#[tokio::test]
async fn test_load_schedule_and_complete_today() {
    let backend = FakeBackend::with_plans(vec![plan(1)]);
    let (app, store, _clock) = create_test_app(backend.clone()).await;

    let mut schedule = ScheduleState::new();
    app.load_schedule(1, &mut schedule)
        .await
        .expect("Failed to load schedule");
    assert_eq!(schedule.len(), 3);
    assert!(!schedule.is_loading());

    let today = schedule.current_item().expect("No item in progress").key();
    let completed = app
        .complete_item(&mut schedule, &today)
        .await
        .expect("Failed to complete item");

    assert_eq!(completed.status, ScheduleStatus::Complete);
    assert!(completed.is_completed);
    let local = schedule.find(&today).expect("Item missing after completion");
    assert_eq!(local.status, ScheduleStatus::Complete);
    assert_eq!(local.status_message, "Completed");
    assert_eq!(backend.completions(), 1);

    // Completion invalidates the cached plans
    assert!(!store.contains(PLANS_KEY));
}

#[tokio::test]
async fn test_locked_item_is_rejected_before_any_request() {
    let backend = FakeBackend::with_plans(vec![plan(1)]);
    let (app, _store, _clock) = create_test_app(backend.clone()).await;

    let mut schedule = ScheduleState::new();
    app.load_schedule(1, &mut schedule)
        .await
        .expect("Failed to load schedule");

    let locked = schedule.get(2).expect("Missing third day").key();
    let result = app.complete_item(&mut schedule, &locked).await;

    assert!(matches!(
        result,
        Err(AquaError::InvalidTransition {
            from: ScheduleStatus::Locked,
            to: ScheduleStatus::Complete
        })
    ));
    assert_eq!(backend.completions(), 0);
    assert_eq!(schedule.get(2).map(|item| item.status), Some(ScheduleStatus::Locked));
}

#[tokio::test]
async fn test_load_schedule_unknown_plan_records_error() {
    let backend = FakeBackend::with_plans(vec![plan(1)]);
    let (app, _store, _clock) = create_test_app(backend).await;

    let mut schedule = ScheduleState::new();
    let result = app.load_schedule(99, &mut schedule).await;

    assert!(matches!(result, Err(AquaError::InvalidInput { .. })));
    assert_eq!(schedule.error(), Some("Plan 99 not found"));
    assert!(schedule.is_empty());
    assert!(!schedule.is_loading());
}

#[tokio::test]
async fn test_failed_completion_leaves_item_unchanged() {
    let backend = FakeBackend::with_plans(vec![plan(1)]);
    let (app, _store, _clock) = create_test_app(backend.clone()).await;

    let mut schedule = ScheduleState::new();
    app.load_schedule(1, &mut schedule)
        .await
        .expect("Failed to load schedule");
    let today = schedule.current_item().expect("No item in progress").key();

    backend.set_offline(true);
    let result = app.complete_item(&mut schedule, &today).await;

    assert!(matches!(result, Err(AquaError::Timeout { .. })));
    assert_eq!(
        schedule.find(&today).map(|item| item.status),
        Some(ScheduleStatus::InProgress)
    );
}

#[tokio::test]
async fn test_dashboard_refresh_fills_panels_and_cache() {
    let backend = FakeBackend::with_plans(vec![plan(1), plan(2)]);
    let (app, store, clock) = create_test_app(backend).await;

    let mut dashboard = Dashboard::with_clock(Arc::new(clock));
    app.refresh_dashboard(&mut dashboard, "Irbid")
        .await
        .expect("Failed to refresh dashboard");

    assert!(!dashboard.has_errors());
    match dashboard.tasks.view() {
        PanelView::Ready(tasks) => assert_eq!(tasks.len(), 2),
        other => panic!("Expected ready tasks panel, got {other:?}"),
    }
    match dashboard.weather.view() {
        PanelView::Ready(weather) => assert_eq!(weather.city, "Irbid"),
        other => panic!("Expected ready weather panel, got {other:?}"),
    }
    assert_eq!(dashboard.plans.data().map(Vec::len), Some(2));
    assert_eq!(dashboard.plans.fetched_at(), Some(start_time()));
    assert!(store.contains(PLANS_KEY));
}

#[tokio::test]
async fn test_dashboard_keeps_previous_data_when_offline() {
    let backend = FakeBackend::with_plans(vec![plan(1)]);
    let (app, _store, _clock) = create_test_app(backend.clone()).await;

    let mut dashboard = Dashboard::new();
    app.refresh_dashboard(&mut dashboard, "Irbid")
        .await
        .expect("Failed to refresh dashboard");

    backend.set_offline(true);
    app.refresh_dashboard(&mut dashboard, "Irbid")
        .await
        .expect("Refresh itself should not fail");

    assert!(dashboard.has_errors());
    assert_eq!(
        dashboard.weather.error(),
        Some("The request took too long. Please try again.")
    );
    assert_eq!(dashboard.plans.data().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_chat_round_trip_is_recorded() {
    let (app, _store, clock) = create_test_app(FakeBackend::default()).await;

    let conversation = app
        .send_chat(None, "When should I water my olive trees?")
        .await
        .expect("Failed to send chat");
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.messages[0].role, ChatRole::User);
    assert_eq!(conversation.messages[1].role, ChatRole::Assistant);
    assert_eq!(
        conversation.messages[1].content,
        "(0 earlier) You said: When should I water my olive trees?"
    );

    clock.advance(SignedDuration::from_mins(1));
    let followup = app
        .send_chat(Some(&conversation.id), "And in winter?")
        .await
        .expect("Failed to send follow-up");
    assert_eq!(followup.messages.len(), 4);
    assert_eq!(followup.messages[3].content, "(2 earlier) You said: And in winter?");
    assert_eq!(followup.title(), "When should I water my olive trees?");

    let stored = app.chat_history().list().await;
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_failed_chat_records_nothing() {
    let backend = FakeBackend::default();
    let (app, _store, _clock) = create_test_app(backend.clone()).await;

    let conversation = app.chat_history().create_conversation().await.unwrap();
    backend.set_offline(true);

    let result = app.send_chat(Some(&conversation.id), "Hello").await;
    assert!(result.is_err());

    let stored = app
        .chat_history()
        .conversation(&conversation.id)
        .await
        .expect("Conversation missing");
    assert!(stored.messages.is_empty());

    let blank = app.send_chat(None, "   ").await;
    assert!(matches!(blank, Err(AquaError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_failed_new_chat_leaves_no_conversation() {
    let backend = FakeBackend::default();
    let (app, _store, _clock) = create_test_app(backend.clone()).await;

    backend.set_offline(true);
    assert!(matches!(
        app.send_chat(None, "Hello").await,
        Err(AquaError::Timeout { .. })
    ));
    assert!(app.chat_history().list().await.is_empty());

    backend.set_offline(false);
    backend.set_silent(true);
    assert!(matches!(
        app.send_chat(None, "Hello").await,
        Err(AquaError::UnexpectedResponse { .. })
    ));
    assert!(app.chat_history().list().await.is_empty());

    backend.set_silent(false);
    let conversation = app.send_chat(None, "Hello").await.unwrap();
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(app.chat_history().list().await.len(), 1);
}
