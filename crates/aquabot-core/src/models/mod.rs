//! Data models for irrigation plans, schedules, and client-side records.
//!
//! Wire models mirror the backend's camelCase JSON. Display implementations
//! live in [`crate::display::models`] so presentation stays out of the data
//! definitions.
//!
//! # Examples
//!
//! ```rust
//! use aquabot_core::models::{ScheduleItem, SchedulePatch, ScheduleStatus};
//!
//! let mut item: ScheduleItem = serde_json::from_str(
//!     r#"{"planId":1,"day":"Day 1","status":"inprogress","date":"2025-06-01"}"#,
//! )
//! .unwrap();
//! assert!(item.can_complete());
//!
//! SchedulePatch::complete().apply_to(&mut item);
//! assert_eq!(item.status, ScheduleStatus::Complete);
//! assert!(item.is_completed);
//! ```

pub mod analysis;
pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod plan;
pub mod schedule;
pub mod status;


pub use analysis::AnalysisResult;
pub use auth::{LoginResponse, UserProfile};
pub use chat::{ChatConversation, ChatMessage, ChatRole};
pub use dashboard::{DailyForecast, TodayTask, WeatherReport};
pub use plan::{CachedPlanSet, IrrigationPlan};
pub use schedule::{ScheduleItem, ScheduleKey, SchedulePatch};
pub use status::{ScheduleStatus, UrgencyLevel};
