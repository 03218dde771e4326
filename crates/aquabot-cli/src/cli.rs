//! Subcommand arguments and the command handlers behind them.
//!
//! Argument structs carry clap derives and convert into core types with
//! `From`, so `aquabot-core` stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Types → AquaBot → Markdown
//! ```
//!
//! Every handler formats its result as markdown through the `Display`
//! wrappers in `aquabot_core::display` and hands it to the
//! [`TerminalRenderer`].

use std::{path::PathBuf, process::ExitCode};

use anyhow::{bail, Result};
use aquabot_core::{
    display::{
        CacheStatus, Conversations, DashboardView, LocalDateTime, OperationStatus, Plans,
        Schedule,
    },
    AquaBot, AquaError, Dashboard, ScheduleKey, ScheduleState, SqliteStore,
};
use clap::{Args, Subcommand};
use jiff::civil::Date;
use log::{info, warn};

use crate::{args::Commands, renderer::TerminalRenderer};

#[derive(Args)]
pub struct LoginArgs {
    pub email: String,
    #[arg(long, env = "AQUABOT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(help = "Display name for the new account")]
    pub name: String,
    pub email: String,
    #[arg(long, env = "AQUABOT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Subcommand)]
pub enum PasswordCommands {
    /// Email a reset code to the account
    Forgot { email: String },
    /// Set a new password using the emailed code
    Reset {
        email: String,
        code: String,
        #[arg(long, env = "AQUABOT_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
}

#[derive(Args)]
pub struct PlansArgs {
    #[arg(long, help = "Ignore the local cache and fetch from the server")]
    pub refresh: bool,
}

#[derive(Args)]
pub struct ScheduleArgs {
    #[arg(help = "ID of the irrigation plan")]
    pub plan_id: u64,
}

#[derive(Args)]
pub struct CompleteArgs {
    #[arg(help = "ID of the irrigation plan")]
    pub plan_id: u64,
    #[arg(help = "Scheduled date of the item, YYYY-MM-DD")]
    pub date: Date,
}

impl From<CompleteArgs> for ScheduleKey {
    fn from(val: CompleteArgs) -> Self {
        ScheduleKey {
            plan_id: val.plan_id,
            date: val.date,
        }
    }
}

#[derive(Args)]
pub struct DashboardArgs {
    #[arg(long, env = "AQUABOT_CITY", default_value = "Riyadh")]
    pub city: String,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[arg(help = "Path to a JPEG or PNG photo of the field")]
    pub image: PathBuf,
}

#[derive(Subcommand)]
pub enum ChatCommands {
    /// Send a message, starting a new conversation unless one is given
    #[command(alias = "s")]
    Send {
        message: String,
        #[arg(short, long, help = "Continue the conversation with this ID")]
        conversation: Option<String>,
    },
    /// List stored conversations, most recent first
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a conversation
    Show { id: String },
    /// Delete a conversation
    #[command(aliases = ["d", "rm"])]
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show whether a fresh plan snapshot is stored
    Status,
    /// Remove the stored plan snapshot
    Clear,
}

#[derive(Args)]
pub struct LanguageArgs {
    #[arg(help = "Language code to switch to (en or ar)")]
    pub code: Option<String>,
}

/// Runs one command against the client and renders its output.
pub struct Cli {
    app: AquaBot<SqliteStore>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(app: AquaBot<SqliteStore>, renderer: TerminalRenderer) -> Self {
        Self { app, renderer }
    }

    /// Runs `command`. Client errors are shown as their user-facing message
    /// and reported through the exit code; anything else is returned.
    pub async fn run(&mut self, command: Option<Commands>) -> Result<ExitCode> {
        let Err(error) = self.dispatch(command).await else {
            return Ok(ExitCode::SUCCESS);
        };
        let Some(aqua) = error.downcast_ref::<AquaError>() else {
            return Err(error);
        };

        warn!("Command failed: {aqua}");
        self.renderer
            .render_error(&OperationStatus::failure(aqua.user_message()))?;
        Ok(ExitCode::FAILURE)
    }

    async fn dispatch(&mut self, command: Option<Commands>) -> Result<()> {
        match command {
            Some(Commands::Login(args)) => self.login(args).await,
            Some(Commands::Register(args)) => self.register(args).await,
            Some(Commands::Logout) => self.logout().await,
            Some(Commands::Password { command }) => self.handle_password_command(command).await,
            Some(Commands::Plans(args)) => self.list_plans(args.refresh).await,
            Some(Commands::Schedule(args)) => self.show_schedule(args.plan_id).await,
            Some(Commands::Complete(args)) => self.complete(args.into()).await,
            Some(Commands::Dashboard(args)) => self.dashboard(&args.city).await,
            Some(Commands::Analyze(args)) => self.analyze(args).await,
            Some(Commands::Chat { command }) => self.handle_chat_command(command).await,
            Some(Commands::Cache { command }) => self.handle_cache_command(command).await,
            Some(Commands::Language(args)) => self.language(args.code).await,
            None => self.list_plans(false).await,
        }
    }

    async fn login(&mut self, args: LoginArgs) -> Result<()> {
        let user = self.app.login(&args.email, &args.password).await?;
        self.renderer
            .render_status(&OperationStatus::success(format!("Logged in as {}", user.name)))
    }

    async fn register(&mut self, args: RegisterArgs) -> Result<()> {
        let user = self
            .app
            .register(&args.name, &args.email, &args.password)
            .await?;
        self.renderer.render_status(&OperationStatus::success(format!(
            "Account created for {}",
            user.email
        )))
    }

    async fn logout(&mut self) -> Result<()> {
        self.app.logout().await?;
        self.renderer
            .render_status(&OperationStatus::success("Logged out"))
    }

    async fn handle_password_command(&self, command: PasswordCommands) -> Result<()> {
        let message = match command {
            PasswordCommands::Forgot { email } => self.app.forgot_password(&email).await?,
            PasswordCommands::Reset {
                email,
                code,
                new_password,
            } => self.app.reset_password(&email, &code, &new_password).await?,
        };
        self.renderer
            .render_status(&OperationStatus::success(message))
    }

    async fn list_plans(&self, refresh: bool) -> Result<()> {
        let view = self.app.irrigation_plans(refresh).await?;
        info!(
            "Loaded {} plans (cached: {})",
            view.plans.len(),
            view.from_cache
        );

        let mut output = String::from("# Irrigation Plans\n\n");
        if view.from_cache {
            output.push_str(&format!(
                "*Cached copy from {}. Use --refresh to update.*\n\n",
                LocalDateTime(&view.fetched_at)
            ));
        }
        output.push_str(&Plans(view.plans).to_string());
        self.renderer.render(&output)
    }

    async fn show_schedule(&self, plan_id: u64) -> Result<()> {
        let mut schedule = ScheduleState::new();
        self.app.load_schedule(plan_id, &mut schedule).await?;

        let counts = schedule.counts();
        let output = format!(
            "# Schedule for plan {plan_id}\n\n{} complete, {} in progress, {} expired, {} locked\n\n{}",
            counts.complete,
            counts.in_progress,
            counts.expired,
            counts.locked,
            Schedule(schedule.items().to_vec())
        );
        self.renderer.render(&output)
    }

    async fn complete(&self, key: ScheduleKey) -> Result<()> {
        let mut schedule = ScheduleState::new();
        self.app.load_schedule(key.plan_id, &mut schedule).await?;

        let item = self.app.complete_item(&mut schedule, &key).await?;
        self.renderer.render_status(&OperationStatus::success(format!(
            "{} of plan {} marked as complete",
            item.day, item.plan_id
        )))?;
        self.renderer.render(&item.to_string())
    }

    async fn dashboard(&self, city: &str) -> Result<()> {
        let mut dashboard = Dashboard::new();
        self.app.refresh_dashboard(&mut dashboard, city).await?;
        self.renderer
            .render(&format!("# Dashboard\n\n{}", DashboardView(&dashboard)))
    }

    async fn analyze(&self, args: AnalyzeArgs) -> Result<()> {
        let results = self.app.analyze_image(&args.image).await?;
        if results.is_empty() {
            return self
                .renderer
                .render_status(&OperationStatus::failure("The image could not be analyzed."));
        }
        let output: String = results.iter().map(ToString::to_string).collect();
        self.renderer.render(&output)
    }

    async fn handle_chat_command(&self, command: ChatCommands) -> Result<()> {
        let history = self.app.chat_history();

        match command {
            ChatCommands::Send {
                message,
                conversation,
            } => {
                let updated = self
                    .app
                    .send_chat(conversation.as_deref(), &message)
                    .await?;
                let reply = updated
                    .messages
                    .last()
                    .map(|message| message.content.as_str())
                    .unwrap_or_default();
                self.renderer
                    .render(&format!("**AquaBot**: {reply}\n\n*Conversation `{}`*\n", updated.id))
            }
            ChatCommands::List => {
                let output = format!("# Conversations\n\n{}", Conversations(history.list().await));
                self.renderer.render(&output)
            }
            ChatCommands::Show { id } => match history.conversation(&id).await {
                Some(conversation) => self.renderer.render(&conversation.to_string()),
                None => bail!("Conversation '{id}' not found"),
            },
            ChatCommands::Delete { id } => {
                if history.delete_conversation(&id).await? {
                    self.renderer
                        .render_status(&OperationStatus::success(format!("Deleted conversation {id}")))
                } else {
                    bail!("Conversation '{id}' not found")
                }
            }
        }
    }

    async fn handle_cache_command(&self, command: CacheCommands) -> Result<()> {
        let cache = self.app.plan_cache();

        match command {
            CacheCommands::Status => {
                let status = CacheStatus {
                    age: cache.cache_age().await,
                    ttl: cache.ttl(),
                };
                self.renderer.render(&status.to_string())
            }
            CacheCommands::Clear => {
                cache.clear_cache().await?;
                self.renderer
                    .render_status(&OperationStatus::success("Plan cache cleared"))
            }
        }
    }

    async fn language(&self, code: Option<String>) -> Result<()> {
        let session = self.app.session();

        match code {
            Some(code) => {
                session.set_language(&code).await?;
                let current = session.language().await;
                self.renderer.render_status(&OperationStatus::success(format!(
                    "Language set to {current}"
                )))
            }
            None => {
                let current = session.language().await;
                self.renderer.render(&format!("Language: {current}\n"))
            }
        }
    }
}
