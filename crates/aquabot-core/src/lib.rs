//! Core library for the AquaBot irrigation assistant client.
//!
//! This crate holds everything below the screens: the device key-value
//! store, the 24-hour irrigation plan cache, schedule item lifecycle state,
//! dashboard aggregation, the backend HTTP client, and local chat history.
//!
//! # Display Architecture
//!
//! Domain models implement [`std::fmt::Display`] as markdown (see
//! [`display`]); the CLI renders that markdown to the terminal. The same data
//! can therefore be shown as a list entry, a detail page, or a dashboard panel
//! without the models knowing about any of them.
//!
//! # Quick Start
//!
//! ```rust
//! use aquabot_core::{cache::PlanCache, store::MemoryStore};
//! use serde_json::json;
//!
//! # async fn example() -> aquabot_core::Result<()> {
//! let cache = PlanCache::new(MemoryStore::new());
//!
//! cache.save_plans(&[json!({"id": 1, "schedule": []})]).await?;
//! assert!(cache.has_valid_cache().await);
//!
//! let plans: Option<Vec<serde_json::Value>> = cache.load_plans().await;
//! assert_eq!(plans.map(|p| p.len()), Some(1));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod cache;
pub mod chat;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod display;
pub mod error;
pub mod guard;
pub mod models;
pub mod schedule;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use api::{ApiClient, ApiErrorCode, Backend};
pub use app::{AquaBot, AquaBotBuilder, PlansView};
pub use cache::PlanCache;
pub use chat::ChatHistory;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ClientConfig;
pub use dashboard::{Dashboard, Panel, PanelView};
pub use db::Database;
pub use display::{CacheStatus, Conversations, DashboardView, OperationStatus, Plans, Schedule};
pub use error::{AquaError, Result};
pub use guard::RequestGuard;
pub use models::{
    ChatConversation, IrrigationPlan, ScheduleItem, ScheduleKey, SchedulePatch, ScheduleStatus,
    UrgencyLevel,
};
pub use schedule::ScheduleState;
pub use session::Session;
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
