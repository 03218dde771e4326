//! Irrigation plan DTO and the cached plan set envelope.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ScheduleItem, ScheduleStatus};

/// A server-defined irrigation schedule for one field over a date range.
///
/// Fields the client does not model are kept in `extra` so a plan survives a
/// trip through the cache unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationPlan {
    /// Unique identifier for the plan
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Day-by-day schedule, in day order
    #[serde(default)]
    pub schedule: Vec<ScheduleItem>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IrrigationPlan {
    /// Label used in lists: the field name when known.
    pub fn label(&self) -> String {
        self.field_name
            .clone()
            .unwrap_or_else(|| format!("Plan {}", self.id))
    }

    /// Number of schedule items already completed.
    pub fn completed_days(&self) -> usize {
        self.schedule
            .iter()
            .filter(|item| item.status == ScheduleStatus::Complete)
            .count()
    }
}

/// The locally persisted snapshot of a user's irrigation plans.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CachedPlanSet<T> {
    /// Plans exactly as they were fetched
    pub plans: Vec<T>,

    /// When the snapshot was written (UTC)
    pub timestamp: Timestamp,
}
