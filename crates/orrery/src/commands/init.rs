//! Workspace initialization and discovery.
//!
//! Creates the `.orrery/` directory holding configuration and the saved
//! session, and locates an existing workspace by walking up from the
//! current directory.

use crate::error::{Error, Result};
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the orrery workspace directory.
pub const ORRERY_DIR_NAME: &str = ".orrery";

/// Name of the configuration file inside `.orrery/`.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the saved session file inside `.orrery/`.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Name of the gitignore file inside `.orrery/`.
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Default number of topics suggested by `orrery next`.
pub const DEFAULT_RECOMMEND_LIMIT: usize = 5;

/// Maximum directory depth for upward workspace discovery.
const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Vertical jitter applied when laying out topic positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JitterMode {
    /// Random offset within the jitter span. Default.
    #[default]
    Random,
    /// No offset; every topic sits exactly on its ring plane.
    None,
}

/// Workspace configuration stored in `.orrery/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrreryConfig {
    /// Layout jitter mode.
    #[serde(default)]
    pub jitter: JitterMode,

    /// How many topics `orrery next` suggests by default.
    #[serde(rename = "recommend-limit", default = "default_recommend_limit")]
    pub recommend_limit: usize,
}

fn default_recommend_limit() -> usize {
    DEFAULT_RECOMMEND_LIMIT
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            jitter: JitterMode::Random,
            recommend_limit: DEFAULT_RECOMMEND_LIMIT,
        }
    }
}

impl OrreryConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await?;
        serde_yaml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_yaml::to_string(self).map_err(|e| Error::Config(e.to_string()))?;
        tokio::fs::write(path, contents).await?;
        Ok(())
    }
}

/// Result of a successful initialization.
#[derive(Debug, Clone)]
pub struct InitResult {
    /// Path to the created `.orrery/` directory.
    pub orrery_dir: PathBuf,
    /// Path to the configuration file.
    pub config_file: PathBuf,
    /// Path to the session file.
    pub session_file: PathBuf,
}

/// Initialize an orrery workspace in the given directory.
///
/// Creates `.orrery/` with a default configuration, an empty session,
/// and a gitignore for scratch files. With `force`, an existing
/// workspace is removed and recreated.
///
/// # Errors
///
/// Returns an error if the workspace already exists (without `force`)
/// or if any file cannot be written.
pub async fn init(base_dir: &Path, force: bool) -> Result<InitResult> {
    let orrery_dir = base_dir.join(ORRERY_DIR_NAME);

    if orrery_dir.exists() {
        if force {
            tracing::info!(path = %orrery_dir.display(), "Removing existing workspace");
            tokio::fs::remove_dir_all(&orrery_dir).await?;
        } else {
            return Err(Error::Config(format!(
                "Orrery workspace already initialized at {}",
                orrery_dir.display()
            )));
        }
    }

    tokio::fs::create_dir_all(&orrery_dir).await?;

    let config_file = orrery_dir.join(CONFIG_FILE_NAME);
    OrreryConfig::default().save(&config_file).await?;

    let session_file = orrery_dir.join(SESSION_FILE_NAME);
    Session::default().save(&session_file).await?;

    // Atomic saves leave *.tmp files behind if interrupted
    let gitignore_file = orrery_dir.join(GITIGNORE_FILE_NAME);
    tokio::fs::write(&gitignore_file, "*.tmp\n").await?;

    tracing::info!(path = %orrery_dir.display(), "Initialized orrery workspace");

    Ok(InitResult {
        orrery_dir,
        config_file,
        session_file,
    })
}

/// Check whether a directory contains an orrery workspace.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(ORRERY_DIR_NAME).is_dir()
}

/// Walk up from `start_dir` looking for a directory containing `.orrery/`.
///
/// Returns the workspace root (the directory that contains `.orrery/`),
/// or `None` if no workspace is found before the filesystem root.
pub fn find_orrery_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if is_initialized(&current) {
            return Some(current);
        }

        if depth >= MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
        depth += 1;
    }
}
