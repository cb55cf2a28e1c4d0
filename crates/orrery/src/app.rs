//! Application context for CLI command execution.
//!
//! `App` ties together workspace discovery, configuration, and the loaded
//! session. Commands mutate the session through it and call [`App::save`]
//! afterwards.

use crate::commands::init::{
    find_orrery_root, JitterMode, OrreryConfig, CONFIG_FILE_NAME, ORRERY_DIR_NAME,
    SESSION_FILE_NAME,
};
use crate::error::{Error, Result};
use crate::session::Session;
use chrono::Utc;
use orrery_graph::{Jitter, NoJitter, ThreadRngJitter, TopicId};
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
///
/// Holds the loaded session and configuration for the discovered
/// workspace. Created once per command invocation.
#[derive(Debug)]
pub struct App {
    /// The loaded study session.
    session: Session,

    /// Workspace configuration.
    config: OrreryConfig,

    /// Path to the workspace directory (`.orrery`).
    orrery_dir: PathBuf,
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree for a `.orrery/` directory, then
    /// loads configuration and the saved session.
    ///
    /// # Errors
    ///
    /// Returns an error if no workspace is found in the directory tree,
    /// or if the configuration or session cannot be loaded.
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_orrery_root(working_dir).ok_or(Error::NotInitialized)?;

        let orrery_dir = root_dir.join(ORRERY_DIR_NAME);
        let config = OrreryConfig::load(&orrery_dir.join(CONFIG_FILE_NAME)).await?;
        let session = Session::load(&orrery_dir.join(SESSION_FILE_NAME)).await?;

        Ok(Self {
            session,
            config,
            orrery_dir,
        })
    }

    /// Get an immutable reference to the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Get the workspace configuration.
    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    /// Get the path to the workspace directory.
    pub fn orrery_dir(&self) -> &Path {
        &self.orrery_dir
    }

    /// Get the path to the session file.
    pub fn session_path(&self) -> PathBuf {
        self.orrery_dir.join(SESSION_FILE_NAME)
    }

    /// Build the layout jitter source selected by configuration.
    pub fn jitter(&self) -> Box<dyn Jitter> {
        match self.config.jitter {
            JitterMode::Random => Box::new(ThreadRngJitter),
            JitterMode::None => Box::new(NoJitter),
        }
    }

    /// Resolve a topic name to its ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TopicNotFound`] if no topic has that name.
    pub fn resolve_topic(&self, name: &str) -> Result<TopicId> {
        self.session
            .graph
            .node_by_name(name)
            .map(|node| node.id.clone())
            .ok_or_else(|| Error::TopicNotFound(name.to_string()))
    }

    /// Save the session to persistent storage.
    ///
    /// Stamps `saved_at` before writing. Call after any mutating command.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn save(&mut self) -> Result<()> {
        self.session.saved_at = Utc::now();
        self.session.save(&self.session_path()).await
    }
}
