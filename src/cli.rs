use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about = "Now-screening and on-demand cards from Jellyfin/Emby")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List cards for active playback sessions
    NowScreening {
        /// Strip user ids from the output
        #[arg(long)]
        hide_user: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List continue-watching cards, falling back to recently added
    OnDemand {
        /// Number of cards (default 30, max 200)
        #[arg(short = 'n', long)]
        count: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
