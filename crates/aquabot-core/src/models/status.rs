//! Status enumerations for schedule items and tasks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a single schedule item.
///
/// `InProgress` is the only status a user can act on; it may move to
/// `Complete`. `Locked` becomes `InProgress` only on the server (date rollover)
/// and is observed through the next refetch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    /// Future day, not yet actionable
    Locked,

    /// Today's task, waiting for the user
    #[serde(alias = "in_progress", alias = "inProgress")]
    InProgress,

    /// Day passed without completion
    Expired,

    /// Watering done
    #[serde(alias = "completed")]
    Complete,
}

impl FromStr for ScheduleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "locked" => Ok(ScheduleStatus::Locked),
            "inprogress" | "in_progress" => Ok(ScheduleStatus::InProgress),
            "expired" => Ok(ScheduleStatus::Expired),
            "complete" | "completed" => Ok(ScheduleStatus::Complete),
            _ => Err(format!("Invalid schedule status: {s}")),
        }
    }
}

impl ScheduleStatus {
    /// Wire representation used by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Locked => "locked",
            ScheduleStatus::InProgress => "inprogress",
            ScheduleStatus::Expired => "expired",
            ScheduleStatus::Complete => "complete",
        }
    }

    /// Whether a user may move an item from this status to `next`.
    pub fn can_transition_to(&self, next: ScheduleStatus) -> bool {
        matches!(
            (self, next),
            (ScheduleStatus::InProgress, ScheduleStatus::Complete)
        )
    }

    /// Locked items cannot be expanded or acted on.
    pub fn is_interactive(&self) -> bool {
        !matches!(self, ScheduleStatus::Locked)
    }

    /// Expired and complete items are read-only.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScheduleStatus::Expired | ScheduleStatus::Complete)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use aquabot_core::models::ScheduleStatus;
    ///
    /// assert_eq!(ScheduleStatus::Complete.with_icon(), "✓ Complete");
    /// assert_eq!(ScheduleStatus::Locked.with_icon(), "🔒 Locked");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            ScheduleStatus::Locked => "🔒 Locked",
            ScheduleStatus::InProgress => "➤ In Progress",
            ScheduleStatus::Expired => "✗ Expired",
            ScheduleStatus::Complete => "✓ Complete",
        }
    }
}

/// How pressing a day's watering is. Informational only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UrgencyLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl FromStr for UrgencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(UrgencyLevel::High),
            "medium" => Ok(UrgencyLevel::Medium),
            "low" => Ok(UrgencyLevel::Low),
            _ => Err(format!("Invalid urgency level: {s}")),
        }
    }
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::High => "High",
            UrgencyLevel::Medium => "Medium",
            UrgencyLevel::Low => "Low",
        }
    }
}
