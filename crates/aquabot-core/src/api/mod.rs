//! Backend API boundary.
//!
//! - [`envelope`]: normalizes the inconsistently cased response envelope
//! - [`codes`]: backend error codes and their translated messages
//! - [`client`]: the HTTP client
//!
//! The data endpoints the rest of the crate depends on are described by the
//! [`Backend`] trait so the dashboard and app facade can run against fakes.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{ChatRole, IrrigationPlan, ScheduleItem, ScheduleKey, TodayTask, WeatherReport},
};

pub mod client;
pub mod codes;
pub mod envelope;

pub use client::ApiClient;
pub use codes::ApiErrorCode;
pub use envelope::Envelope;

/// One message of conversation history as exchanged with the assistant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Assistant answer plus the history the server echoes back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Data endpoints used by the dashboard, schedule, and chat flows.
pub trait Backend: Send + Sync {
    /// Tasks due today for the logged-in user.
    fn today_tasks(&self) -> impl Future<Output = Result<Vec<TodayTask>>> + Send;

    /// Current weather and short forecast for `city`.
    fn weather(&self, city: &str) -> impl Future<Output = Result<WeatherReport>> + Send;

    /// All irrigation plans belonging to `user_id`.
    fn irrigation_plans(
        &self,
        user_id: u64,
    ) -> impl Future<Output = Result<Vec<IrrigationPlan>>> + Send;

    /// Marks the task at `key` complete and returns the server's copy.
    fn complete_task(&self, key: &ScheduleKey)
        -> impl Future<Output = Result<ScheduleItem>> + Send;

    /// Sends `message` with prior `history` to the assistant.
    fn chat(
        &self,
        message: &str,
        history: &[ChatTurn],
    ) -> impl Future<Output = Result<ChatReply>> + Send;
}
