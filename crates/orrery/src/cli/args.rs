//! Command argument structures for the CLI.
//!
//! Each command's arguments live in their own struct, kept separate from
//! the command dispatch so they can be constructed directly in tests.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use super::types::{TemplateArg, TopicStatusArg};
use super::validators::{validate_note_text, validate_topic_name, validate_url};

/// Arguments for the `init` command
#[derive(Args, Debug, Default, Clone)]
pub struct InitArgs {
    /// Overwrite an existing workspace
    #[arg(long)]
    pub force: bool,

    /// Suppress informational output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `load` command
#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    /// Path to a syllabus file
    #[arg(conflicts_with = "template")]
    pub file: Option<PathBuf>,

    /// Load a built-in template instead of a file
    #[arg(short, long, value_enum)]
    pub template: Option<TemplateArg>,
}

/// Arguments for the `info` command
#[derive(Args, Debug, Default, Clone)]
pub struct InfoArgs {}

/// Arguments for the `list` command
#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// Only show topics with this status
    #[arg(short, long, value_enum)]
    pub status: Option<TopicStatusArg>,

    /// Only show topics at this depth layer
    #[arg(short, long)]
    pub depth: Option<u32>,
}

/// Arguments for the `show` command
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Topic name (exact match)
    #[arg(value_parser = validate_topic_name)]
    pub name: String,
}

/// Arguments for the `tree` command
#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// Topic name (exact match)
    #[arg(value_parser = validate_topic_name)]
    pub name: String,

    /// Maximum prerequisite depth to expand (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub depth: usize,
}

/// Arguments for the `path` command
#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Starting topic name (exact match)
    #[arg(value_parser = validate_topic_name)]
    pub from: String,

    /// Goal topic name (exact match)
    #[arg(value_parser = validate_topic_name)]
    pub to: String,
}

/// Arguments for the `link` command
#[derive(Args, Debug, Clone)]
pub struct LinkArgs {
    /// Prerequisite topic name (exact match)
    #[arg(value_parser = validate_topic_name)]
    pub source: String,

    /// Dependent topic name (exact match)
    #[arg(value_parser = validate_topic_name)]
    pub target: String,
}

/// Arguments for the `complete` command
#[derive(Args, Debug, Clone)]
pub struct CompleteArgs {
    /// Topic name (exact match)
    #[arg(value_parser = validate_topic_name)]
    pub name: String,
}

/// Arguments for the `reopen` command
#[derive(Args, Debug, Clone)]
pub struct ReopenArgs {
    /// Topic name (exact match)
    #[arg(value_parser = validate_topic_name)]
    pub name: String,
}

/// Arguments for the `note` command
#[derive(Args, Debug, Clone)]
pub struct NoteArgs {
    /// Topic name (exact match)
    #[arg(value_parser = validate_topic_name)]
    pub name: String,

    /// Note text (replaces any existing note)
    #[arg(value_parser = validate_note_text)]
    pub text: String,
}

/// Arguments for the `resource` command
#[derive(Args, Debug, Clone)]
pub struct ResourceArgs {
    /// Resource action to perform
    #[command(subcommand)]
    pub action: ResourceAction,
}

/// Resource management actions
#[derive(Subcommand, Debug, Clone)]
pub enum ResourceAction {
    /// Attach a learning resource to a topic
    Add {
        /// Topic name (exact match)
        #[arg(value_parser = validate_topic_name)]
        name: String,

        /// Resource URL
        #[arg(value_parser = validate_url)]
        url: String,

        /// Display title (defaults to the URL)
        #[arg(long)]
        title: Option<String>,
    },
    /// Remove a resource from a topic by URL
    Remove {
        /// Topic name (exact match)
        #[arg(value_parser = validate_topic_name)]
        name: String,

        /// Resource URL to remove
        #[arg(value_parser = validate_url)]
        url: String,
    },
    /// List the resources attached to a topic
    List {
        /// Topic name (exact match)
        #[arg(value_parser = validate_topic_name)]
        name: String,
    },
}

/// Arguments for the `study` command
#[derive(Args, Debug, Clone)]
pub struct StudyArgs {
    /// Topic name (exact match)
    #[arg(value_parser = validate_topic_name)]
    pub name: String,

    /// Minutes studied (must be at least 1)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub minutes: u32,
}

/// Arguments for the `next` command
#[derive(Args, Debug, Default, Clone)]
pub struct NextArgs {
    /// Maximum number of recommendations (defaults to the configured limit)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for the `stats` command
#[derive(Args, Debug, Default, Clone)]
pub struct StatsArgs {
    /// Include the per-layer breakdown
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for the `export` command
#[derive(Args, Debug, Default, Clone)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `import` command
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Path to a previously exported graph file
    pub file: PathBuf,
}

/// Arguments for the `reset` command
#[derive(Args, Debug, Default, Clone)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,
}
