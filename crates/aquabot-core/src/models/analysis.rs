//! Image analysis result.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ScheduleItem;

/// Result of analysing an uploaded field image.
///
/// The backend may create a plan as a side effect, in which case `plan_id` is
/// set and `schedule` holds its first days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_condition: Option<String>,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub schedule: Vec<ScheduleItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
