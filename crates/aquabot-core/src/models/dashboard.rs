//! Read models for the dashboard panels.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::UrgencyLevel;

/// A single task from the today's-tasks endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodayTask {
    pub task_id: u64,
    pub plan_id: u64,
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub water_amount_liters: f64,
    #[serde(default)]
    pub water_amount_buckets: f64,
    #[serde(default)]
    pub urgency_level: UrgencyLevel,
    #[serde(default)]
    pub is_completed: bool,
}

/// Current conditions and short forecast for a city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub city: String,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    #[serde(default)]
    pub description: String,
    /// Chance of rain, percent
    #[serde(default)]
    pub rain_chance: Option<f64>,
    /// km/h
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub forecast: Vec<DailyForecast>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub date: Date,
    pub min_temp: f64,
    pub max_temp: f64,
    #[serde(default)]
    pub description: String,
}
