use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    AnalyzeArgs, CacheCommands, ChatCommands, CompleteArgs, DashboardArgs, LanguageArgs,
    LoginArgs, PasswordCommands, PlansArgs, RegisterArgs, ScheduleArgs,
};

/// Terminal client for the AquaBot irrigation assistant
///
/// Shows irrigation plans and their day-by-day schedules, marks today's
/// watering as done, and talks to the assistant. Plans are cached locally for
/// 24 hours so they can be viewed without a connection.
#[derive(Parser)]
#[command(version, about, name = "aquabot")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/aquabot/aquabot.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Base URL of the AquaBot backend
    #[arg(long, global = true, env = "AQUABOT_API_URL")]
    pub api_url: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login(LoginArgs),
    /// Create an account and log in
    Register(RegisterArgs),
    /// Forget the session and cached plans
    Logout,
    /// Request or use a password reset code
    Password {
        #[command(subcommand)]
        command: PasswordCommands,
    },
    /// List irrigation plans
    #[command(alias = "p")]
    Plans(PlansArgs),
    /// Show the day-by-day schedule of a plan
    #[command(alias = "s")]
    Schedule(ScheduleArgs),
    /// Mark a day's watering as complete
    #[command(alias = "c")]
    Complete(CompleteArgs),
    /// Show today's tasks, weather, and plans together
    #[command(alias = "d")]
    Dashboard(DashboardArgs),
    /// Upload a field photo for analysis
    Analyze(AnalyzeArgs),
    /// Talk to the irrigation assistant
    Chat {
        #[command(subcommand)]
        command: ChatCommands,
    },
    /// Inspect or clear the local plan cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
    /// Show or set the interface language
    Language(LanguageArgs),
}
