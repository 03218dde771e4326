//! Schedule item model and its local patch type.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{ScheduleStatus, UrgencyLevel};

/// One irrigation task for one day of a plan.
///
/// Incoming data is normalized on deserialization: `is_completed` is derived
/// from `status` and water amounts are clamped to zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "ScheduleItemWire")]
pub struct ScheduleItem {
    /// ID of the parent plan
    pub plan_id: u64,

    /// Display label, e.g. "Day 3"
    pub day: String,

    /// Lifecycle status driving all derived UI state
    pub status: ScheduleStatus,

    /// True only when `status` is complete
    pub is_completed: bool,

    pub water_amount_liters: f64,

    pub water_amount_buckets: f64,

    pub urgency_level: UrgencyLevel,

    /// Scheduled calendar date
    pub date: Date,

    /// Preformatted date label from the backend
    pub date_display: String,

    pub instruction: String,

    pub status_message: String,
}

/// Schedule item exactly as received, before normalization.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleItemWire {
    plan_id: u64,
    day: String,
    status: ScheduleStatus,
    #[serde(default)]
    water_amount_liters: f64,
    #[serde(default)]
    water_amount_buckets: f64,
    #[serde(default)]
    urgency_level: UrgencyLevel,
    date: Date,
    #[serde(default)]
    date_display: String,
    #[serde(default)]
    instruction: String,
    #[serde(default)]
    status_message: String,
}

impl From<ScheduleItemWire> for ScheduleItem {
    fn from(wire: ScheduleItemWire) -> Self {
        Self {
            plan_id: wire.plan_id,
            day: wire.day,
            status: wire.status,
            is_completed: wire.status == ScheduleStatus::Complete,
            water_amount_liters: wire.water_amount_liters.max(0.0),
            water_amount_buckets: wire.water_amount_buckets.max(0.0),
            urgency_level: wire.urgency_level,
            date: wire.date,
            date_display: wire.date_display,
            instruction: wire.instruction,
            status_message: wire.status_message,
        }
    }
}

impl ScheduleItem {
    /// Stable identity of this item across refetches.
    pub fn key(&self) -> ScheduleKey {
        ScheduleKey {
            plan_id: self.plan_id,
            date: self.date,
        }
    }

    /// Whether the item may be expanded to show its details.
    pub fn can_expand(&self) -> bool {
        self.status.is_interactive()
    }

    /// Whether "mark as complete" is offered for this item.
    pub fn can_complete(&self) -> bool {
        self.status.can_transition_to(ScheduleStatus::Complete)
    }
}

/// Identifies a schedule item by plan and date rather than list position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleKey {
    pub plan_id: u64,
    pub date: Date,
}

/// Partial update for a schedule item. `None` fields are left untouched.
///
/// There is no `is_completed` field: it is derived from `status` on apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulePatch {
    pub status: Option<ScheduleStatus>,
    pub water_amount_liters: Option<f64>,
    pub water_amount_buckets: Option<f64>,
    pub urgency_level: Option<UrgencyLevel>,
    pub instruction: Option<String>,
    pub status_message: Option<String>,
}

impl SchedulePatch {
    /// Patch that marks an item complete.
    pub fn complete() -> Self {
        Self {
            status: Some(ScheduleStatus::Complete),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow-merges the set fields into `item`.
    ///
    /// Negative water amounts are clamped to zero.
    pub fn apply_to(&self, item: &mut ScheduleItem) {
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(liters) = self.water_amount_liters {
            item.water_amount_liters = liters.max(0.0);
        }
        if let Some(buckets) = self.water_amount_buckets {
            item.water_amount_buckets = buckets.max(0.0);
        }
        if let Some(urgency) = self.urgency_level {
            item.urgency_level = urgency;
        }
        if let Some(instruction) = &self.instruction {
            item.instruction.clone_from(instruction);
        }
        if let Some(message) = &self.status_message {
            item.status_message.clone_from(message);
        }
        item.is_completed = item.status == ScheduleStatus::Complete;
    }
}
