use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Local-first polls: one vote per user, donut charts, light/dark theme.
#[derive(Debug, Parser)]
#[command(name = "pollbooth", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new poll
    Create {
        /// The poll question
        #[arg(long)]
        question: String,

        /// Comma-separated list of options
        #[arg(long, value_delimiter = ',')]
        options: Vec<String>,

        /// Days until the poll is shown as closed
        #[arg(long, value_name = "DAYS")]
        expires_in: Option<i64>,
    },

    /// List all polls, newest first
    List,

    /// Show a poll's results
    Show {
        /// ID of the poll to show
        poll_id: String,

        /// Also render the results as a donut chart PNG
        #[arg(long, value_name = "PNG_PATH")]
        chart: Option<PathBuf>,
    },

    /// Vote for an option on a poll
    Vote {
        /// ID of the poll to vote on
        poll_id: String,

        /// Option label to vote for
        option: String,
    },

    /// Delete a poll
    Delete {
        /// ID of the poll to delete
        poll_id: String,
    },

    /// Show or toggle the light/dark theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}
