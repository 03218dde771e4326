//! Markdown formatting for domain models and view state.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and composite views get newtype wrappers so an empty list or a
//! loading panel renders a sensible message instead of nothing.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Newtype Wrappers│    │    Markdown     │
//! │ (Plan, Item...) │───▶│  & View Types   │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: `Plans`, `Schedule`, `Conversations`
//! - [`dashboard`]: the three-panel dashboard view
//! - [`status`]: operation feedback and cache status lines
//! - [`datetime`]: timestamp formatting in the system timezone
//!
//! ```rust
//! use aquabot_core::display::{OperationStatus, Plans};
//!
//! assert_eq!(Plans(vec![]).to_string(), "No irrigation plans found.\n");
//!
//! let done = OperationStatus::success("Cache cleared");
//! assert_eq!(done.to_string(), "✓ Cache cleared\n");
//! ```

pub mod collections;
pub mod dashboard;
pub mod datetime;
pub mod models;
pub mod status;

pub use collections::{Conversations, Plans, Schedule};
pub use dashboard::DashboardView;
pub use datetime::{HumanDuration, LocalDateTime};
pub use status::{CacheStatus, OperationStatus};
