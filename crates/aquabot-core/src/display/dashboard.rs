//! Dashboard view.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::dashboard::{Dashboard, Panel, PanelData, PanelView};

/// Renders all dashboard panels, each in its own loading/empty/ready state.
pub struct DashboardView<'a>(pub &'a Dashboard);

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dashboard = self.0;

        section(f, "Today's Tasks", &dashboard.tasks, "No tasks for today.", |f, tasks| {
            tasks.iter().try_for_each(|task| write!(f, "{task}"))
        })?;
        section(f, "Weather", &dashboard.weather, "No weather data.", |f, weather| {
            write!(f, "{weather}")
        })?;
        section(f, "Plans", &dashboard.plans, "No irrigation plans yet.", |f, plans| {
            plans.iter().try_for_each(|plan| {
                writeln!(
                    f,
                    "- **{}** (ID: {}): {}/{} days complete",
                    plan.label(),
                    plan.id,
                    plan.completed_days(),
                    plan.schedule.len()
                )
            })
        })
    }
}

fn section<T: PanelData>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    panel: &Panel<T>,
    empty: &str,
    ready: impl FnOnce(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    writeln!(f, "## {title}")?;
    writeln!(f)?;

    match panel.view() {
        PanelView::Loading => writeln!(f, "Loading...")?,
        PanelView::Empty => writeln!(f, "{empty}")?,
        PanelView::Ready(data) => ready(f, data)?,
    }

    if let Some(error) = panel.error() {
        writeln!(f)?;
        match panel.fetched_at() {
            Some(at) => writeln!(f, "*{error} Showing data from {}.*", LocalDateTime(&at))?,
            None => writeln!(f, "*{error}*")?,
        }
    }
    writeln!(f)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::{
        error::AquaError,
        models::{TodayTask, UrgencyLevel, WeatherReport},
    };

    #[test]
    fn test_dashboard_view_renders_each_panel_state() {
        let mut dashboard = Dashboard::new();
        let now = Timestamp::UNIX_EPOCH;

        dashboard.tasks.apply(
            Ok(vec![TodayTask {
                task_id: 1,
                plan_id: 2,
                field_name: Some("East plot".to_string()),
                instruction: String::new(),
                water_amount_liters: 5.0,
                water_amount_buckets: 0.5,
                urgency_level: UrgencyLevel::Low,
                is_completed: false,
            }]),
            now,
        );
        dashboard.weather.apply(
            Err(AquaError::Http {
                status: 502,
                message: "Bad Gateway".to_string(),
            }),
            now,
        );
        dashboard.plans.start_loading();

        let output = DashboardView(&dashboard).to_string();
        assert!(output.contains("## Today's Tasks"));
        assert!(output.contains("- [ ] **East plot**: 5.0 L (0.5 buckets), Low urgency"));
        assert!(output.contains("No weather data."));
        assert!(output.contains("*HTTP 502: Bad Gateway*"));
        assert!(output.contains("## Plans\n\nLoading..."));
    }

    #[test]
    fn test_weather_panel_ready() {
        let mut dashboard = Dashboard::new();
        dashboard.weather.apply(
            Ok(WeatherReport {
                city: "Amman".to_string(),
                temperature: 31.4,
                humidity: 22.0,
                description: "Clear".to_string(),
                rain_chance: Some(0.0),
                wind_speed: None,
                forecast: vec![],
            }),
            Timestamp::UNIX_EPOCH,
        );

        let output = DashboardView(&dashboard).to_string();
        assert!(output.contains("**Amman**: 31°C, Clear"));
        assert!(output.contains("- Humidity: 22%"));
        assert!(output.contains("No tasks for today."));
    }
}
