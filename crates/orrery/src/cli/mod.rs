//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for orrery using clap's
//! derive API. Each command has its own argument struct with validation and
//! helpful error messages. Topics are addressed by name; ids show up in
//! output but are never typed.
//!
//! # Commands
//!
//! - `init`: Initialize an orrery workspace
//! - `load`: Parse a syllabus into the session
//! - `list`: List topics with optional filters
//! - `show`: Show topic details
//! - `tree`: Show a topic's prerequisite tree
//! - `path`: Find a study path between two topics
//! - `link`: Add a prerequisite edge
//! - `complete` / `reopen`: Track completion
//! - `next`: Suggest what to study next
//! - `stats`: Show progress statistics
//! - `export` / `import`: Share sessions as JSON
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! orrery load --template react
//! orrery complete "React Basics"
//! orrery next
//! orrery path "React Basics" Routing
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

// Re-export argument structs
pub use args::{
    CompleteArgs, ExportArgs, ImportArgs, InfoArgs, InitArgs, LinkArgs, ListArgs, LoadArgs,
    NextArgs, NoteArgs, PathArgs, ReopenArgs, ResetArgs, ResourceAction, ResourceArgs, ShowArgs,
    StatsArgs, StudyArgs, TreeArgs,
};

// Re-export types
pub use types::{TemplateArg, TopicStatusArg};

// Re-export validators for external use
pub use validators::{validate_note_text, validate_topic_name, validate_url};

/// Orrery - a study path planner for prerequisite-heavy subjects
///
/// Parses a plain-text syllabus into a dependency graph, lays the topics
/// out in orbital layers, and answers questions like "what can I study
/// next" and "what is the shortest route to topic X". State lives in
/// `.orrery/session.json` for easy version control integration.
#[derive(Parser, Debug)]
#[command(name = "orrery")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize an orrery workspace
    ///
    /// Creates the `.orrery/` directory with configuration and an empty
    /// session. Run this once in the directory where you keep your notes.
    Init(InitArgs),

    /// Load a syllabus into the session
    ///
    /// Parses a syllabus file (or a built-in template), lays the topics
    /// out, and replaces the current session. One topic per line, written
    /// as `Name` or `Name: Prerequisite, Prerequisite`.
    Load(LoadArgs),

    /// Show workspace information
    ///
    /// Displays the session path, when it was last saved, and topic counts
    /// by status.
    Info(InfoArgs),

    /// List topics with optional filters
    ///
    /// Shows all topics in syllabus order. Filter by stored status or by
    /// layer depth.
    List(ListArgs),

    /// Show detailed information about a topic
    ///
    /// Displays all fields of a topic including notes, resources, study
    /// time, prerequisites, and the topics it unlocks.
    Show(ShowArgs),

    /// Show a topic's prerequisite tree
    ///
    /// Renders everything the topic depends on, recursively, plus the
    /// topics it unlocks.
    Tree(TreeArgs),

    /// Find a study path between two topics
    ///
    /// Searches the dependency graph for the cheapest route by estimated
    /// study time. "No path" is an answer, not an error.
    Path(PathArgs),

    /// Add a prerequisite edge between topics
    ///
    /// Records that TARGET depends on SOURCE. Duplicate links are
    /// reported; self-loops and cycles are rejected.
    Link(LinkArgs),

    /// Mark a topic as completed
    ///
    /// Records the completion date and reports any topics that become
    /// ready to study as a result.
    Complete(CompleteArgs),

    /// Reopen a completed topic
    ///
    /// Puts the topic back in orbit and clears its completion date.
    Reopen(ReopenArgs),

    /// Attach notes to a topic
    ///
    /// Replaces the topic's notes with the given text.
    Note(NoteArgs),

    /// Manage a topic's learning resources
    ///
    /// Add, remove, or list resource links. Resources are unique by URL.
    Resource(ResourceArgs),

    /// Log study time on a topic
    ///
    /// Accumulates the given number of minutes onto the topic.
    Study(StudyArgs),

    /// Suggest what to study next
    ///
    /// Lists topics whose prerequisites are all completed, innermost
    /// orbits first.
    Next(NextArgs),

    /// Show progress statistics
    ///
    /// Displays totals, completion percentage, study streak, and with
    /// `--detailed` the per-layer topic counts.
    Stats(StatsArgs),

    /// Export the session as a shareable JSON payload
    ///
    /// Writes a versioned snapshot to a file, or to stdout by default.
    Export(ExportArgs),

    /// Import a session from an exported payload
    ///
    /// Replaces the current session. Topic ids and positions are taken
    /// as-is from the file.
    Import(ImportArgs),

    /// Reset the session
    ///
    /// Discards all topics and the syllabus text. Prompts unless
    /// `--force` is used.
    Reset(ResetArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::Load(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_load(&mut app, args, output_mode).await
            }
            Some(Commands::Info(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_info(&app, args, output_mode).await
            }
            Some(Commands::List(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_list(&app, args, output_mode).await
            }
            Some(Commands::Show(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_show(&app, args, output_mode).await
            }
            Some(Commands::Tree(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_tree(&app, args, output_mode).await
            }
            Some(Commands::Path(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_path(&app, args, output_mode).await
            }
            Some(Commands::Link(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_link(&mut app, args, output_mode).await
            }
            Some(Commands::Complete(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_complete(&mut app, args, output_mode).await
            }
            Some(Commands::Reopen(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_reopen(&mut app, args, output_mode).await
            }
            Some(Commands::Note(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_note(&mut app, args, output_mode).await
            }
            Some(Commands::Resource(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_resource(&mut app, args, output_mode).await
            }
            Some(Commands::Study(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_study(&mut app, args, output_mode).await
            }
            Some(Commands::Next(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_next(&app, args, output_mode).await
            }
            Some(Commands::Stats(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_stats(&app, args, output_mode).await
            }
            Some(Commands::Export(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_export(&app, args, output_mode).await
            }
            Some(Commands::Import(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_import(&mut app, args, output_mode).await
            }
            Some(Commands::Reset(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_reset(&mut app, args, output_mode).await
            }
            None => {
                println!("Orrery study path planner");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
