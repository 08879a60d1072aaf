use std::path::PathBuf;
use clap::Subcommand;
use crate::config::constants::DEFAULT_REVIEW_TIMEOUT_MINUTES;
use crate::enums::diff_mode::DiffMode;

#[derive(Subcommand)]
pub enum Commands {
    /// Create a sample configuration file
    Init,
    /// Chat with the drafting assistant about a staging draft
    Chat {
        /// Path to the draft text file
        #[clap(short, long)]
        draft: PathBuf,
        /// Message for the assistant
        #[clap(short, long)]
        message: String,
        /// Write suggested changes to this JSON file
        #[clap(short, long)]
        save: Option<PathBuf>,
    },
    /// Show a redline between two draft snapshots
    Diff {
        original: PathBuf,
        modified: PathBuf,
        #[clap(short = 'm', long, value_enum, default_value_t = DiffMode::Line)]
        mode: DiffMode,
    },
    /// Apply a change list to a draft and print the redline
    Apply {
        /// Path to the draft text file
        draft: PathBuf,
        /// Path to the change descriptor JSON file
        changes: PathBuf,
        /// Write the modified draft here instead of overwriting
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a change list against a draft without applying it
    Validate {
        draft: PathBuf,
        changes: PathBuf,
    },
    /// Review suggested changes interactively in the browser
    Review {
        draft: PathBuf,
        changes: PathBuf,
        /// Remote draft id to autosave to while reviewing
        #[clap(long)]
        draft_id: Option<String>,
        #[clap(short, long, default_value_t = DEFAULT_REVIEW_TIMEOUT_MINUTES)]
        timeout: u64,
    },
    /// Compile the active draft text into a downloadable document
    Compile {
        draft: PathBuf,
        /// Remote draft id the compiler should use for template metadata
        #[clap(long)]
        draft_id: String,
        #[clap(short, long)]
        output: PathBuf,
    },
}
