use crate::error::Result;
use crate::paths;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Optional project settings read from `.claude/handoff.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Directory holding handoff documents, relative to the project root.
    #[serde(default = "default_handoffs_dir")]
    pub handoffs_dir: PathBuf,
    /// Step tracker file, relative to the project root.
    #[serde(default = "default_steps_file")]
    pub steps_file: PathBuf,
    /// Upper bound for each git invocation. 0 disables the bound.
    #[serde(default = "default_git_timeout")]
    pub git_timeout_seconds: u64,
}

fn default_handoffs_dir() -> PathBuf {
    PathBuf::from(paths::HANDOFFS_DIR)
}

fn default_steps_file() -> PathBuf {
    PathBuf::from(paths::STEPS_FILE)
}

fn default_git_timeout() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            handoffs_dir: default_handoffs_dir(),
            steps_file: default_steps_file(),
            git_timeout_seconds: default_git_timeout(),
        }
    }
}

impl Config {
    /// Load the config for `root`. A missing file yields the defaults; a
    /// malformed one is an error.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn handoffs_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.handoffs_dir)
    }

    pub fn steps_file(&self, root: &Path) -> PathBuf {
        root.join(&self.steps_file)
    }

    pub fn git_timeout(&self) -> Option<Duration> {
        if self.git_timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.git_timeout_seconds))
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.git_timeout_seconds == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "git_timeout_seconds is 0: git commands may block indefinitely"
                    .to_string(),
            });
        }

        if self.handoffs_dir.is_absolute() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "handoffs_dir '{}' is absolute and ignores the project root",
                    self.handoffs_dir.display()
                ),
            });
        }

        if self.handoffs_dir.as_os_str().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "handoffs_dir must not be empty".to_string(),
            });
        }

        if self.steps_file.as_os_str().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "steps_file must not be empty".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
