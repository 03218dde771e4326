//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use super::datetime::LocalDateTime;
use crate::models::{ChatConversation, IrrigationPlan, ScheduleItem};

/// Plan list rendered as one summary section per plan.
///
/// # Examples
///
/// ```rust
/// use aquabot_core::{display::Plans, models::IrrigationPlan};
///
/// let plan: IrrigationPlan =
///     serde_json::from_str(r#"{"id":5,"fieldName":"Lower terrace","cropType":"Wheat"}"#).unwrap();
/// let output = Plans(vec![plan]).to_string();
/// assert!(output.contains("## Lower terrace (ID: 5)"));
/// ```
pub struct Plans(pub Vec<IrrigationPlan>);

impl Plans {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IrrigationPlan> {
        self.0.iter()
    }
}

impl Index<usize> for Plans {
    type Output = IrrigationPlan;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Plans {
    type Item = &'a IrrigationPlan;
    type IntoIter = std::slice::Iter<'a, IrrigationPlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No irrigation plans found.");
        }

        for plan in &self.0 {
            let progress = if plan.schedule.is_empty() {
                String::new()
            } else {
                format!(" ({}/{})", plan.completed_days(), plan.schedule.len())
            };
            writeln!(f, "## {} (ID: {}){progress}", plan.label(), plan.id)?;
            writeln!(f)?;

            if let Some(crop) = &plan.crop_type {
                writeln!(f, "- **Crop**: {crop}")?;
            }
            if let Some(today) = plan.schedule.iter().find(|item| item.can_complete()) {
                writeln!(
                    f,
                    "- **Today**: {} ({:.1} L)",
                    today.day, today.water_amount_liters
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A plan's schedule items in day order.
pub struct Schedule(pub Vec<ScheduleItem>);

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No schedule items found.");
        }
        for item in &self.0 {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Stored chat conversations, one line each.
pub struct Conversations(pub Vec<ChatConversation>);

impl fmt::Display for Conversations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No conversations found.");
        }
        for conversation in &self.0 {
            writeln!(
                f,
                "- **{}** `{}` ({} messages, updated {})",
                conversation.title(),
                conversation.id,
                conversation.messages.len(),
                LocalDateTime(&conversation.updated_at)
            )?;
        }
        Ok(())
    }
}
