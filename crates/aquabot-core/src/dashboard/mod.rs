//! Dashboard aggregation.
//!
//! The dashboard shows today's tasks, the weather, and the plan list side by
//! side. Each panel is fetched independently and concurrently and carries its
//! own loading/empty/ready state. Panels are not kept consistent with each
//! other: weather and tasks may reflect different fetch times.
//!
//! A failed fetch leaves the panel's previous data in place and records the
//! error. There is no retry.

use std::sync::Arc;

use jiff::Timestamp;
use log::warn;

use crate::{
    api::Backend,
    clock::{Clock, SystemClock},
    error::Result,
    models::{IrrigationPlan, TodayTask, WeatherReport},
};

/// Data that can be shown as an empty state.
pub trait PanelData {
    fn is_empty_data(&self) -> bool;
}

impl<T> PanelData for Vec<T> {
    fn is_empty_data(&self) -> bool {
        self.is_empty()
    }
}

impl PanelData for WeatherReport {
    fn is_empty_data(&self) -> bool {
        false
    }
}

/// What a panel should render right now.
#[derive(Debug, PartialEq)]
pub enum PanelView<'a, T> {
    Loading,
    Empty,
    Ready(&'a T),
}

/// One independently fetched dashboard panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel<T> {
    loading: bool,
    data: Option<T>,
    error: Option<String>,
    fetched_at: Option<Timestamp>,
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Self {
            loading: false,
            data: None,
            error: None,
            fetched_at: None,
        }
    }
}

impl<T: PanelData> Panel<T> {
    pub fn view(&self) -> PanelView<'_, T> {
        if self.loading {
            return PanelView::Loading;
        }
        match &self.data {
            Some(data) if !data.is_empty_data() => PanelView::Ready(data),
            _ => PanelView::Empty,
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// When the shown data was last fetched successfully.
    pub fn fetched_at(&self) -> Option<Timestamp> {
        self.fetched_at
    }

    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    /// Applies a fetch result. On failure the previous data is kept.
    pub fn apply(&mut self, result: Result<T>, now: Timestamp) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.fetched_at = Some(now);
            }
            Err(e) => {
                self.error = Some(e.user_message());
            }
        }
    }
}

/// Today's tasks, weather, and plan panels.
pub struct Dashboard {
    pub tasks: Panel<Vec<TodayTask>>,
    pub weather: Panel<WeatherReport>,
    pub plans: Panel<Vec<IrrigationPlan>>,
    clock: Arc<dyn Clock>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tasks: Panel::default(),
            weather: Panel::default(),
            plans: Panel::default(),
            clock,
        }
    }

    /// Fetches all three panels concurrently and applies each result on its
    /// own.
    pub async fn refresh<B: Backend>(&mut self, backend: &B, city: &str, user_id: u64) {
        self.tasks.start_loading();
        self.weather.start_loading();
        self.plans.start_loading();

        let (tasks, weather, plans) = tokio::join!(
            backend.today_tasks(),
            backend.weather(city),
            backend.irrigation_plans(user_id),
        );

        for (panel, error) in [
            ("tasks", tasks.as_ref().err()),
            ("weather", weather.as_ref().err()),
            ("plans", plans.as_ref().err()),
        ] {
            if let Some(e) = error {
                warn!("Dashboard {panel} panel failed: {e}");
            }
        }

        let now = self.clock.now();
        self.tasks.apply(tasks, now);
        self.weather.apply(weather, now);
        self.plans.apply(plans, now);
    }

    /// Whether any panel reported an error on its last refresh.
    pub fn has_errors(&self) -> bool {
        self.tasks.error().is_some() || self.weather.error().is_some() || self.plans.error().is_some()
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AquaError;

    fn now() -> Timestamp {
        Timestamp::from_second(1_750_000_000).unwrap()
    }

    #[test]
    fn test_panel_tri_state() {
        let mut panel: Panel<Vec<u32>> = Panel::default();
        assert_eq!(panel.view(), PanelView::Empty);

        panel.start_loading();
        assert_eq!(panel.view(), PanelView::Loading);

        panel.apply(Ok(vec![]), now());
        assert_eq!(panel.view(), PanelView::Empty);

        panel.apply(Ok(vec![1, 2]), now());
        assert_eq!(panel.view(), PanelView::Ready(&vec![1, 2]));
        assert_eq!(panel.fetched_at(), Some(now()));
    }

    #[test]
    fn test_failed_panel_keeps_last_data() {
        let mut panel: Panel<Vec<u32>> = Panel::default();
        panel.apply(Ok(vec![7]), now());

        panel.start_loading();
        panel.apply(
            Err(AquaError::Http {
                status: 500,
                message: "Internal Server Error".to_string(),
            }),
            now(),
        );

        assert_eq!(panel.data(), Some(&vec![7]));
        assert_eq!(panel.error(), Some("HTTP 500: Internal Server Error"));
        assert!(!panel.is_loading());

        panel.apply(Ok(vec![8]), now());
        assert_eq!(panel.error(), None);
    }
}
