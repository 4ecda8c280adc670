use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tier-gated video course in the terminal.
#[derive(Debug, Parser)]
#[command(name = "lectern", version, about)]
pub(crate) struct Cli {
    /// Configuration file; `lectern.*` in the working directory is used when omitted.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Unlock a plan with its access secret.
    Login { secret: String },
    /// Forget the current plan.
    Logout,
    /// Show the current plan and overall progress.
    Status,
    /// List modules with their progress.
    Modules,
    /// List the lessons of a module.
    Lessons { module: String },
    /// Show a lesson and its player URL.
    Play {
        lesson: String,
        /// Address of the page embedding the player.
        #[arg(long, default_value = "https://lectern.local/lesson")]
        href: String,
    },
    /// Mark a lesson completed, or undo it.
    Toggle { lesson: String },
    /// Lesson after the given one, across module boundaries.
    Next { lesson: String },
    /// Lesson before the given one, across module boundaries.
    Prev { lesson: String },
    /// Time left until a scheduled lesson opens.
    Countdown {
        lesson: String,
        /// Keep ticking until the lesson is released.
        #[arg(short, long)]
        watch: bool,
    },
    /// Draw random preview clips.
    Preview {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Rotate on the configured interval instead of drawing at once.
        #[arg(short, long)]
        watch: bool,
    },
}
