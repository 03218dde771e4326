//! In-memory irrigation schedule state.
//!
//! [`ScheduleState`] holds the day-by-day schedule of the active plan. It is
//! an ordinary owned value: construct one per view, or one per test.
//!
//! Mutation comes in two flavours:
//!
//! - **Wholesale**: [`ScheduleState::set_schedule_items`] replaces everything
//!   with what the server returned. Any local patch is discarded.
//! - **Local patch**: [`ScheduleState::update_schedule_item`] (by position) and
//!   [`ScheduleState::update_by_key`] (by plan and date). Patches are a
//!   client-side visual update only; they are never written back.
//!
//! Completion goes through [`ScheduleState::begin_completion`], which checks
//! the status transition before anything is sent, and
//! [`ScheduleState::reconcile`], which applies the server's authoritative copy.

use std::sync::Arc;

use jiff::Timestamp;

use crate::{
    clock::{Clock, SystemClock},
    error::{AquaError, Result},
    models::{ScheduleItem, ScheduleKey, SchedulePatch, ScheduleStatus},
};

#[cfg(test)]
mod tests;

/// Per-status item counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub locked: usize,
    pub in_progress: usize,
    pub expired: usize,
    pub complete: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.locked + self.in_progress + self.expired + self.complete
    }
}

/// Current schedule plus its loading/error state.
pub struct ScheduleState {
    items: Vec<ScheduleItem>,
    loading: bool,
    error: Option<String>,
    last_updated: Option<Timestamp>,
    clock: Arc<dyn Clock>,
}

impl ScheduleState {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            last_updated: None,
            clock,
        }
    }

    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&ScheduleItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_updated(&self) -> Option<Timestamp> {
        self.last_updated
    }

    /// Marks a fetch as started. Existing items stay visible.
    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    /// Records a failed fetch. Existing items stay visible.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Replaces the whole schedule with `items`.
    ///
    /// Clears the loading flag and any error and stamps `last_updated`.
    /// Calling it twice with the same list is the same as calling it once,
    /// apart from the timestamp.
    pub fn set_schedule_items(&mut self, items: Vec<ScheduleItem>) {
        self.items = items;
        self.loading = false;
        self.error = None;
        self.last_updated = Some(self.clock.now());
    }

    /// Shallow-merges `patch` into the item at `index`.
    ///
    /// An out-of-range index is ignored and `false` is returned; state is not
    /// touched.
    pub fn update_schedule_item(&mut self, index: usize, patch: &SchedulePatch) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                patch.apply_to(item);
                true
            }
            None => false,
        }
    }

    /// Shallow-merges `patch` into the item identified by `key`.
    ///
    /// Returns `false` when no item matches.
    pub fn update_by_key(&mut self, key: &ScheduleKey, patch: &SchedulePatch) -> bool {
        match self.position(key) {
            Some(index) => self.update_schedule_item(index, patch),
            None => false,
        }
    }

    /// Empties the schedule, e.g. on logout or plan switch.
    pub fn clear_schedule_items(&mut self) {
        self.items.clear();
        self.loading = false;
        self.error = None;
        self.last_updated = None;
    }

    pub fn find(&self, key: &ScheduleKey) -> Option<&ScheduleItem> {
        self.items.iter().find(|item| item.key() == *key)
    }

    pub fn position(&self, key: &ScheduleKey) -> Option<usize> {
        self.items.iter().position(|item| item.key() == *key)
    }

    /// Whether the item at `index` may be expanded. Locked and missing items
    /// may not.
    pub fn can_expand(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(ScheduleItem::can_expand)
    }

    /// Whether "mark as complete" is available for `key`.
    pub fn can_complete(&self, key: &ScheduleKey) -> bool {
        self.find(key).is_some_and(ScheduleItem::can_complete)
    }

    /// Validates that the item at `key` may be completed and returns it.
    ///
    /// Nothing is mutated; the caller sends the request and hands the
    /// server's answer to [`Self::reconcile`].
    ///
    /// # Errors
    ///
    /// `ItemNotFound` when no item matches, `InvalidTransition` when the item
    /// is not in progress.
    pub fn begin_completion(&self, key: &ScheduleKey) -> Result<&ScheduleItem> {
        let item = self.find(key).ok_or_else(|| AquaError::ItemNotFound {
            plan_id: key.plan_id,
            date: key.date.to_string(),
        })?;

        if !item.status.can_transition_to(ScheduleStatus::Complete) {
            return Err(AquaError::InvalidTransition {
                from: item.status,
                to: ScheduleStatus::Complete,
            });
        }
        Ok(item)
    }

    /// Replaces the item matching `authoritative` by key with the server copy.
    ///
    /// Returns `false` if the item is no longer present, which happens when a
    /// refetch landed in between.
    pub fn reconcile(&mut self, authoritative: ScheduleItem) -> bool {
        match self.position(&authoritative.key()) {
            Some(index) => {
                self.items[index] = authoritative;
                true
            }
            None => false,
        }
    }

    /// Items belonging to `plan_id`, in schedule order.
    pub fn items_for_plan(&self, plan_id: u64) -> impl Iterator<Item = &ScheduleItem> {
        self.items.iter().filter(move |item| item.plan_id == plan_id)
    }

    /// The item the user should act on today, if any.
    pub fn current_item(&self) -> Option<&ScheduleItem> {
        self.items
            .iter()
            .find(|item| item.status == ScheduleStatus::InProgress)
    }

    pub fn counts(&self) -> StatusCounts {
        self.items
            .iter()
            .fold(StatusCounts::default(), |mut counts, item| {
                match item.status {
                    ScheduleStatus::Locked => counts.locked += 1,
                    ScheduleStatus::InProgress => counts.in_progress += 1,
                    ScheduleStatus::Expired => counts.expired += 1,
                    ScheduleStatus::Complete => counts.complete += 1,
                }
                counts
            })
    }
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self::new()
    }
}
