//! Display implementations for domain models.
//!
//! Output is markdown, rendered by the CLI's terminal renderer. Kept apart
//! from the model definitions so the wire types stay free of presentation.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{
    AnalysisResult, ChatConversation, ChatRole, IrrigationPlan, ScheduleItem, ScheduleStatus,
    TodayTask, UrgencyLevel, WeatherReport,
};

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ScheduleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = if self.date_display.is_empty() {
            self.date.to_string()
        } else {
            self.date_display.clone()
        };
        writeln!(f, "### {} · {} ({})", self.day, date, self.status.with_icon())?;
        writeln!(f)?;

        // Locked days stay collapsed
        if !self.can_expand() {
            writeln!(f, "Unlocks on {}.", self.date)?;
            writeln!(f)?;
            return Ok(());
        }

        writeln!(
            f,
            "- Water: {:.1} L ({:.1} buckets)",
            self.water_amount_liters, self.water_amount_buckets
        )?;
        writeln!(f, "- Urgency: {}", self.urgency_level)?;
        if !self.status_message.is_empty() {
            writeln!(f, "- Note: {}", self.status_message)?;
        }
        writeln!(f)?;

        if !self.instruction.is_empty() {
            writeln!(f, "{}", self.instruction)?;
            writeln!(f)?;
        }

        if self.can_complete() {
            writeln!(f, "*Ready to mark as complete.*")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for IrrigationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.label())?;
        writeln!(f)?;

        if let Some(crop) = &self.crop_type {
            writeln!(f, "- Crop: {crop}")?;
        }
        if let Some(status) = &self.status {
            writeln!(f, "- Status: {status}")?;
        }
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => writeln!(f, "- Period: {start} to {end}")?,
            (Some(start), None) => writeln!(f, "- Starts: {start}")?,
            (None, Some(end)) => writeln!(f, "- Ends: {end}")?,
            (None, None) => {}
        }
        writeln!(
            f,
            "- Progress: {}/{} days complete",
            self.completed_days(),
            self.schedule.len()
        )?;

        if self.schedule.is_empty() {
            writeln!(f, "\nNo schedule for this plan.")?;
        } else {
            writeln!(f, "\n## Schedule")?;
            writeln!(f)?;
            for item in &self.schedule {
                write!(f, "{item}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for TodayTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.is_completed { "x" } else { " " };
        let field = self
            .field_name
            .clone()
            .unwrap_or_else(|| format!("Plan {}", self.plan_id));
        write!(
            f,
            "- [{check}] **{field}**: {:.1} L ({:.1} buckets), {} urgency",
            self.water_amount_liters, self.water_amount_buckets, self.urgency_level
        )?;
        if !self.instruction.is_empty() {
            write!(f, " - {}", self.instruction)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "**{}**: {:.0}°C", self.city, self.temperature)?;
        if !self.description.is_empty() {
            write!(f, ", {}", self.description)?;
        }
        writeln!(f)?;
        writeln!(f, "- Humidity: {:.0}%", self.humidity)?;
        if let Some(rain) = self.rain_chance {
            writeln!(f, "- Chance of rain: {rain:.0}%")?;
        }
        if let Some(wind) = self.wind_speed {
            writeln!(f, "- Wind: {wind:.0} km/h")?;
        }

        if !self.forecast.is_empty() {
            writeln!(f)?;
            for day in &self.forecast {
                write!(f, "- {}: {:.0}°C to {:.0}°C", day.date, day.min_temp, day.max_temp)?;
                if !day.description.is_empty() {
                    write!(f, ", {}", day.description)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Analysis")?;
        writeln!(f)?;
        if let Some(crop) = &self.crop_type {
            writeln!(f, "- **Crop**: {crop}")?;
        }
        if let Some(soil) = &self.soil_condition {
            writeln!(f, "- **Soil**: {soil}")?;
        }
        if let Some(plan_id) = self.plan_id {
            writeln!(f, "- **Plan created**: {plan_id}")?;
        }
        writeln!(f)?;

        if !self.recommendation.is_empty() {
            writeln!(f, "{}", self.recommendation)?;
            writeln!(f)?;
        }

        for item in &self.schedule {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ChatConversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title())?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Started: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        for message in &self.messages {
            let speaker = match message.role {
                ChatRole::User => "You",
                ChatRole::Assistant => "AquaBot",
            };
            writeln!(f, "**{speaker}**: {}", message.content)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn item(status: ScheduleStatus) -> ScheduleItem {
        ScheduleItem {
            plan_id: 4,
            day: "Day 2".to_string(),
            status,
            is_completed: status == ScheduleStatus::Complete,
            water_amount_liters: 15.0,
            water_amount_buckets: 1.5,
            urgency_level: UrgencyLevel::High,
            date: date(2025, 6, 2),
            date_display: String::new(),
            instruction: "Water the rows closest to the well first".to_string(),
            status_message: String::new(),
        }
    }

    #[test]
    fn test_status_display_uses_wire_form() {
        assert_eq!(ScheduleStatus::InProgress.to_string(), "inprogress");
        assert_eq!(UrgencyLevel::Low.to_string(), "Low");
        assert_eq!(ChatRole::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_locked_item_hides_details() {
        let output = item(ScheduleStatus::Locked).to_string();
        assert!(output.contains("### Day 2 · 2025-06-02 (🔒 Locked)"));
        assert!(output.contains("Unlocks on 2025-06-02."));
        assert!(!output.contains("Water:"));
        assert!(!output.contains("closest to the well"));
    }

    #[test]
    fn test_in_progress_item_offers_completion() {
        let output = item(ScheduleStatus::InProgress).to_string();
        assert!(output.contains("- Water: 15.0 L (1.5 buckets)"));
        assert!(output.contains("- Urgency: High"));
        assert!(output.contains("closest to the well"));
        assert!(output.contains("Ready to mark as complete."));

        let expired = item(ScheduleStatus::Expired).to_string();
        assert!(expired.contains("- Water: 15.0 L"));
        assert!(!expired.contains("Ready to mark as complete."));
    }

    #[test]
    fn test_plan_display() {
        let plan = IrrigationPlan {
            id: 12,
            field_name: Some("Olive grove".to_string()),
            crop_type: Some("Olives".to_string()),
            start_date: Some(date(2025, 6, 1)),
            end_date: Some(date(2025, 6, 7)),
            status: None,
            schedule: vec![item(ScheduleStatus::Complete), item(ScheduleStatus::InProgress)],
            extra: Default::default(),
        };
        let output = plan.to_string();
        assert!(output.starts_with("# 12. Olive grove\n"));
        assert!(output.contains("- Crop: Olives"));
        assert!(output.contains("- Period: 2025-06-01 to 2025-06-07"));
        assert!(output.contains("- Progress: 1/2 days complete"));
        assert!(output.contains("## Schedule"));

        let empty = IrrigationPlan {
            schedule: vec![],
            ..plan
        };
        assert!(empty.to_string().contains("No schedule for this plan."));
    }

    #[test]
    fn test_today_task_display() {
        let task = TodayTask {
            task_id: 1,
            plan_id: 3,
            field_name: None,
            instruction: "Evening watering".to_string(),
            water_amount_liters: 8.0,
            water_amount_buckets: 0.8,
            urgency_level: UrgencyLevel::Medium,
            is_completed: true,
        };
        assert_eq!(
            task.to_string(),
            "- [x] **Plan 3**: 8.0 L (0.8 buckets), Medium urgency - Evening watering\n"
        );
    }
}
