#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use aquabot_core::{
    api::{Backend, ChatReply, ChatTurn},
    models::{
        IrrigationPlan, LoginResponse, ScheduleItem, ScheduleKey, SchedulePatch, ScheduleStatus,
        TodayTask, UrgencyLevel, UserProfile, WeatherReport,
    },
    AquaBot, AquaError, ManualClock, MemoryStore, Result,
};
use jiff::{civil::Date, Timestamp};

pub const USER_ID: u64 = 42;

pub fn start_time() -> Timestamp {
    "2025-06-02T06:00:00Z".parse().expect("valid timestamp")
}

pub fn item(plan_id: u64, day: i8, status: ScheduleStatus) -> ScheduleItem {
    ScheduleItem {
        plan_id,
        day: format!("Day {day}"),
        status,
        is_completed: status == ScheduleStatus::Complete,
        water_amount_liters: 10.0,
        water_amount_buckets: 1.0,
        urgency_level: UrgencyLevel::Medium,
        date: Date::new(2025, 6, day).expect("valid date"),
        date_display: String::new(),
        instruction: format!("Water plot {plan_id}"),
        status_message: String::new(),
    }
}

/// Plan with a completed first day, today in progress, and a locked third
/// day.
pub fn plan(id: u64) -> IrrigationPlan {
    IrrigationPlan {
        id,
        field_name: Some(format!("Field {id}")),
        crop_type: Some("Tomatoes".to_string()),
        start_date: None,
        end_date: None,
        status: Some("active".to_string()),
        schedule: vec![
            item(id, 1, ScheduleStatus::Complete),
            item(id, 2, ScheduleStatus::InProgress),
            item(id, 3, ScheduleStatus::Locked),
        ],
        extra: Default::default(),
    }
}

/// In-memory backend that records calls and can be told to fail.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub plans: Arc<Mutex<Vec<IrrigationPlan>>>,
    pub plan_fetches: Arc<AtomicUsize>,
    pub completions: Arc<AtomicUsize>,
    pub offline: Arc<AtomicBool>,
    pub silent: Arc<AtomicBool>,
}

impl FakeBackend {
    pub fn with_plans(plans: Vec<IrrigationPlan>) -> Self {
        let backend = Self::default();
        *backend.plans.lock().unwrap() = plans;
        backend
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Makes chat answer with an empty reply.
    pub fn set_silent(&self, silent: bool) {
        self.silent.store(silent, Ordering::SeqCst);
    }

    pub fn plan_fetches(&self) -> usize {
        self.plan_fetches.load(Ordering::SeqCst)
    }

    pub fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(AquaError::Timeout {
                operation: "Request".to_string(),
                seconds: 30,
            })
        } else {
            Ok(())
        }
    }
}

impl Backend for FakeBackend {
    async fn today_tasks(&self) -> Result<Vec<TodayTask>> {
        self.check_online()?;
        let plans = self.plans.lock().unwrap();
        Ok(plans
            .iter()
            .flat_map(|plan| plan.schedule.iter())
            .filter(|item| item.status == ScheduleStatus::InProgress)
            .enumerate()
            .map(|(index, item)| TodayTask {
                task_id: index as u64 + 1,
                plan_id: item.plan_id,
                field_name: None,
                instruction: item.instruction.clone(),
                water_amount_liters: item.water_amount_liters,
                water_amount_buckets: item.water_amount_buckets,
                urgency_level: item.urgency_level,
                is_completed: false,
            })
            .collect())
    }

    async fn weather(&self, city: &str) -> Result<WeatherReport> {
        self.check_online()?;
        Ok(WeatherReport {
            city: city.to_string(),
            temperature: 29.0,
            humidity: 35.0,
            description: "Sunny".to_string(),
            rain_chance: Some(5.0),
            wind_speed: Some(12.0),
            forecast: vec![],
        })
    }

    async fn irrigation_plans(&self, user_id: u64) -> Result<Vec<IrrigationPlan>> {
        self.check_online()?;
        self.plan_fetches.fetch_add(1, Ordering::SeqCst);
        assert_eq!(user_id, USER_ID);
        Ok(self.plans.lock().unwrap().clone())
    }

    async fn complete_task(&self, key: &ScheduleKey) -> Result<ScheduleItem> {
        self.check_online()?;
        self.completions.fetch_add(1, Ordering::SeqCst);
        let mut plans = self.plans.lock().unwrap();
        let item = plans
            .iter_mut()
            .flat_map(|plan| plan.schedule.iter_mut())
            .find(|item| item.key() == *key)
            .ok_or(AquaError::ItemNotFound {
                plan_id: key.plan_id,
                date: key.date.to_string(),
            })?;
        SchedulePatch {
            status_message: Some("Completed".to_string()),
            ..SchedulePatch::complete()
        }
        .apply_to(item);
        Ok(item.clone())
    }

    async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<ChatReply> {
        self.check_online()?;
        if self.silent.load(Ordering::SeqCst) {
            return Ok(ChatReply {
                reply: String::new(),
                history: vec![],
            });
        }
        Ok(ChatReply {
            reply: format!("({} earlier) You said: {message}", history.len()),
            history: vec![],
        })
    }
}

/// App over an in-memory store with a logged-in user and a manual clock.
pub async fn create_test_app(
    backend: FakeBackend,
) -> (AquaBot<MemoryStore, FakeBackend>, MemoryStore, ManualClock) {
    let store = MemoryStore::new();
    let clock = ManualClock::new(start_time());
    let app = AquaBot::from_parts(store.clone(), backend, Arc::new(clock.clone()));

    app.session()
        .save_login(&LoginResponse {
            token: "test-token".to_string(),
            user: UserProfile {
                id: USER_ID,
                name: "Test Farmer".to_string(),
                email: "farmer@example.com".to_string(),
            },
        })
        .await
        .expect("Failed to store session");

    (app, store, clock)
}
