//! High-level client API.
//!
//! [`AquaBot`] is the coordinator a screen talks to. It wires the device
//! store, the plan cache, the backend, and the per-view state containers
//! together:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Screen / CLI   │───▶│     AquaBot     │───▶│  Backend (HTTP) │
//! │                 │    │                 │───▶│  KeyValueStore  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! State containers ([`ScheduleState`], [`Dashboard`]) are owned by the
//! caller and passed in, so each view (or test) gets its own instance.
//!
//! # Usage
//!
//! ```rust,no_run
//! use aquabot_core::{AquaBotBuilder, ScheduleState};
//!
//! # async fn example() -> aquabot_core::Result<()> {
//! let mut app = AquaBotBuilder::new()
//!     .with_api_url(Some("https://api.example.com"))
//!     .build()
//!     .await?;
//!
//! app.login("farmer@example.com", "secret").await?;
//!
//! let plans = app.irrigation_plans(false).await?;
//! if let Some(plan) = plans.plans.first() {
//!     let mut schedule = ScheduleState::new();
//!     app.load_schedule(plan.id, &mut schedule).await?;
//! }
//! # Ok(())
//! # }
//! ```

use std::{path::Path, sync::Arc};

use jiff::{SignedDuration, Timestamp};
use log::{info, warn};

use crate::{
    api::{ApiClient, Backend},
    cache::{PlanCache, DEFAULT_TTL},
    chat::{to_turns, ChatHistory},
    clock::Clock,
    dashboard::Dashboard,
    error::{AquaError, Result},
    guard::RequestGuard,
    models::{
        AnalysisResult, ChatConversation, IrrigationPlan, LoginResponse, ScheduleItem,
        ScheduleKey, UserProfile,
    },
    schedule::ScheduleState,
    session::Session,
    store::KeyValueStore,
};

pub mod builder;

pub use builder::AquaBotBuilder;

/// Irrigation plans together with where they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlansView {
    pub plans: Vec<IrrigationPlan>,
    /// True when served from the local cache instead of the network
    pub from_cache: bool,
    /// When the shown plans were fetched
    pub fetched_at: Timestamp,
}

/// Main client interface.
pub struct AquaBot<S, B = ApiClient> {
    store: S,
    backend: B,
    clock: Arc<dyn Clock>,
    cache_ttl: SignedDuration,
    completion_guard: RequestGuard,
    analysis_guard: RequestGuard,
}

impl<S, B> AquaBot<S, B>
where
    S: KeyValueStore + Clone,
    B: Backend,
{
    /// Assembles a client from its parts.
    pub fn from_parts(store: S, backend: B, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            backend,
            clock,
            cache_ttl: DEFAULT_TTL,
            completion_guard: RequestGuard::new(),
            analysis_guard: RequestGuard::new(),
        }
    }

    /// Overrides the plan cache freshness window.
    pub fn with_cache_ttl(mut self, ttl: SignedDuration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session(&self) -> Session<S> {
        Session::new(self.store.clone())
    }

    pub fn plan_cache(&self) -> PlanCache<S> {
        PlanCache::with_clock(self.store.clone(), Arc::clone(&self.clock)).with_ttl(self.cache_ttl)
    }

    pub fn chat_history(&self) -> ChatHistory<S> {
        ChatHistory::with_clock(self.store.clone(), Arc::clone(&self.clock))
    }

    /// Profile of the logged-in user.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` when no session is stored.
    pub async fn current_user(&self) -> Result<UserProfile> {
        self.session()
            .user()
            .await
            .ok_or(AquaError::Unauthenticated)
    }

    /// Returns the user's irrigation plans, cache first.
    ///
    /// With `refresh` the cache is cleared and the network is always used. A
    /// successful fetch is written back to the cache; a failed write is only
    /// logged.
    pub async fn irrigation_plans(&self, refresh: bool) -> Result<PlansView> {
        let cache = self.plan_cache();

        if refresh {
            if let Err(e) = cache.clear_cache().await {
                warn!("Failed to clear plan cache before refresh: {e}");
            }
        } else if let Some(snapshot) = cache.load_snapshot::<IrrigationPlan>().await {
            info!("Using {} cached irrigation plans", snapshot.plans.len());
            return Ok(PlansView {
                plans: snapshot.plans,
                from_cache: true,
                fetched_at: snapshot.timestamp,
            });
        }

        let user = self.current_user().await?;
        let plans = self.backend.irrigation_plans(user.id).await?;
        self.cache_plans(&plans).await;

        Ok(PlansView {
            plans,
            from_cache: false,
            fetched_at: self.clock.now(),
        })
    }

    /// Loads the schedule of `plan_id` into `state`, replacing its contents.
    ///
    /// On failure the error is recorded on `state` and returned.
    pub async fn load_schedule(&self, plan_id: u64, state: &mut ScheduleState) -> Result<()> {
        state.set_loading();

        let result = self.irrigation_plans(false).await.and_then(|view| {
            view.plans
                .into_iter()
                .find(|plan| plan.id == plan_id)
                .ok_or_else(|| {
                    AquaError::invalid_input("plan_id")
                        .with_reason(format!("Plan {plan_id} not found"))
                })
        });

        match result {
            Ok(plan) => {
                state.set_schedule_items(plan.schedule);
                Ok(())
            }
            Err(e) => {
                state.set_error(e.user_message());
                Err(e)
            }
        }
    }

    /// Marks the in-progress item at `key` complete on the server and applies
    /// the server's copy to `state`.
    ///
    /// The transition is checked before any request is made, and a second
    /// completion while one is in flight is rejected. The plan cache is
    /// invalidated so the next load shows the server's view.
    pub async fn complete_item(
        &self,
        state: &mut ScheduleState,
        key: &ScheduleKey,
    ) -> Result<ScheduleItem> {
        let _ticket = self.completion_guard.try_begin("Mark as complete")?;
        state.begin_completion(key)?;

        let item = self.backend.complete_task(key).await?;
        if !state.reconcile(item.clone()) {
            warn!(
                "Completed item for plan {} on {} is no longer in the schedule",
                key.plan_id, key.date
            );
        }

        if let Err(e) = self.plan_cache().clear_cache().await {
            warn!("Failed to invalidate plan cache after completion: {e}");
        }
        Ok(item)
    }

    /// Refreshes all dashboard panels for the logged-in user.
    ///
    /// A successful plans panel is also written to the plan cache.
    pub async fn refresh_dashboard(&self, dashboard: &mut Dashboard, city: &str) -> Result<()> {
        let user = self.current_user().await?;
        dashboard.refresh(&self.backend, city, user.id).await;

        if dashboard.plans.error().is_none() {
            if let Some(plans) = dashboard.plans.data() {
                self.cache_plans(plans).await;
            }
        }
        Ok(())
    }

    /// Sends `message` to the assistant and records both sides locally.
    ///
    /// A new conversation is started when `conversation_id` is `None`. If the
    /// request fails nothing is recorded.
    pub async fn send_chat(
        &self,
        conversation_id: Option<&str>,
        message: &str,
    ) -> Result<ChatConversation> {
        if message.trim().is_empty() {
            return Err(AquaError::invalid_input("message").with_reason("Message cannot be empty"));
        }

        let history = self.chat_history();
        // A new conversation stays in memory until the reply arrives
        let conversation = match conversation_id {
            Some(id) => history.conversation(id).await.ok_or_else(|| {
                AquaError::invalid_input("conversation")
                    .with_reason(format!("Conversation '{id}' not found"))
            })?,
            None => history.draft_conversation(),
        };

        let reply = self.backend.chat(message, &to_turns(&conversation)).await?;

        history
            .record_exchange(conversation, message, &reply.reply)
            .await
    }

    async fn cache_plans(&self, plans: &[IrrigationPlan]) {
        if let Err(e) = self.plan_cache().save_plans(plans).await {
            warn!("Failed to cache irrigation plans: {e}");
        }
    }
}

impl<S> AquaBot<S, ApiClient>
where
    S: KeyValueStore + Clone,
{
    /// Logs in and stores the session.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserProfile> {
        let login = self.backend.login(email, password).await?;
        self.start_session(login).await
    }

    /// Creates an account and logs it in.
    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> Result<UserProfile> {
        let login = self.backend.register(name, email, password).await?;
        self.start_session(login).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<String> {
        self.backend.forgot_password(email).await
    }

    pub async fn reset_password(&self, email: &str, code: &str, new_password: &str) -> Result<String> {
        self.backend.reset_password(email, code, new_password).await
    }

    /// Forgets the session and the cached plans.
    pub async fn logout(&mut self) -> Result<()> {
        self.backend.set_token(None);
        let session = self.session().clear().await;
        let cache = self.plan_cache().clear_cache().await;
        session.and(cache)
    }

    /// Uploads the image at `path` for analysis.
    pub async fn analyze_image(&self, path: &Path) -> Result<Vec<AnalysisResult>> {
        let _ticket = self.analysis_guard.try_begin("Image analysis")?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AquaError::FileSystem {
                path: path.to_path_buf(),
                source: e,
            })?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("field.jpg");

        self.backend.analyze_image(file_name, bytes).await
    }

    async fn start_session(&mut self, login: LoginResponse) -> Result<UserProfile> {
        self.session().save_login(&login).await?;
        self.backend.set_token(Some(login.token));
        info!("Logged in as user {}", login.user.id);
        Ok(login.user)
    }
}
