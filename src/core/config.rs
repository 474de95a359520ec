//! Configuration for board access and the local fonts checkout
//!
//! Board ids are not public. They are read from `~/.gf_push_config.yaml`
//! (or the file given with `--config`), and any id still missing is taken
//! from the environment:
//!
//! ```yaml
//! repo_root: ~/src/fonts
//! board:
//!   traffic_jam_id: PVT_xxx
//!   status_field_id: PVTSSF_xxx
//!   list_field_id: PVTSSF_yyy
//!   pr_gf_id: "1a2b3c"
//!   # in_dev_id, in_sandbox_id, live_id, to_sandbox_id, to_production_id, blocked_id
//! ```

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::core::entity::{PushList, PushStatus};

/// Config file looked up in the home directory
pub const CONFIG_FILE_NAME: &str = ".gf_push_config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board setting '{key}' is not configured (set it in ~/{file} or the {env} environment variable)", file = CONFIG_FILE_NAME)]
    Missing { key: &'static str, env: &'static str },

    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Invalid { path: String, message: String },
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board: BoardConfig,

    /// Root of the fonts checkout used for existence checks
    pub repo_root: Option<PathBuf>,

    /// Pause between retries of a failed board page fetch
    pub retry_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            repo_root: None,
            retry_delay_ms: 1000,
        }
    }
}

impl Config {
    /// Load config from `explicit`, else the home config file, then fill gaps from the environment
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => default_path().filter(|p| p.exists()),
        };

        let mut config = match path {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        config.board.fill_from(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&contents, &path.display().to_string())
    }

    pub fn from_yaml(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(contents).map_err(|e| ConfigError::Invalid {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

fn default_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILE_NAME))
}

/// Identifiers of the project board and its single-select options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Organisation owning the project
    pub organization: String,
    /// Project number within the organisation
    pub project_number: u32,

    pub traffic_jam_id: Option<String>,
    pub status_field_id: Option<String>,
    pub list_field_id: Option<String>,

    pub pr_gf_id: Option<String>,
    pub in_dev_id: Option<String>,
    pub in_sandbox_id: Option<String>,
    pub live_id: Option<String>,

    pub to_sandbox_id: Option<String>,
    pub to_production_id: Option<String>,
    pub blocked_id: Option<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            organization: "google".to_string(),
            project_number: 74,
            traffic_jam_id: None,
            status_field_id: None,
            list_field_id: None,
            pr_gf_id: None,
            in_dev_id: None,
            in_sandbox_id: None,
            live_id: None,
            to_sandbox_id: None,
            to_production_id: None,
            blocked_id: None,
        }
    }
}

fn required<'a>(
    value: &'a Option<String>,
    key: &'static str,
    env: &'static str,
) -> Result<&'a str, ConfigError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing { key, env })
}

impl BoardConfig {
    /// Fill unset ids using `lookup` on the matching environment variable names
    pub fn fill_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let slots: [(&mut Option<String>, &str); 10] = [
            (&mut self.traffic_jam_id, "TRAFFIC_JAM_ID"),
            (&mut self.status_field_id, "STATUS_FIELD_ID"),
            (&mut self.list_field_id, "LIST_FIELD_ID"),
            (&mut self.pr_gf_id, "PR_GF_ID"),
            (&mut self.in_dev_id, "IN_DEV_ID"),
            (&mut self.in_sandbox_id, "IN_SANDBOX_ID"),
            (&mut self.live_id, "LIVE_ID"),
            (&mut self.to_sandbox_id, "TO_SANDBOX_ID"),
            (&mut self.to_production_id, "TO_PRODUCTION_ID"),
            (&mut self.blocked_id, "BLOCKED_ID"),
        ];
        for (slot, env) in slots {
            if slot.is_none() {
                *slot = lookup(env);
            }
        }
    }

    pub fn project_id(&self) -> Result<&str, ConfigError> {
        required(&self.traffic_jam_id, "traffic_jam_id", "TRAFFIC_JAM_ID")
    }

    pub fn status_field_id(&self) -> Result<&str, ConfigError> {
        required(&self.status_field_id, "status_field_id", "STATUS_FIELD_ID")
    }

    pub fn list_field_id(&self) -> Result<&str, ConfigError> {
        required(&self.list_field_id, "list_field_id", "LIST_FIELD_ID")
    }

    pub fn status_option_id(&self, status: PushStatus) -> Result<&str, ConfigError> {
        match status {
            PushStatus::PrOpen => required(&self.pr_gf_id, "pr_gf_id", "PR_GF_ID"),
            PushStatus::InDev => required(&self.in_dev_id, "in_dev_id", "IN_DEV_ID"),
            PushStatus::InSandbox => {
                required(&self.in_sandbox_id, "in_sandbox_id", "IN_SANDBOX_ID")
            }
            PushStatus::Live => required(&self.live_id, "live_id", "LIVE_ID"),
        }
    }

    pub fn list_option_id(&self, list: PushList) -> Result<&str, ConfigError> {
        match list {
            PushList::ToSandbox => {
                required(&self.to_sandbox_id, "to_sandbox_id", "TO_SANDBOX_ID")
            }
            PushList::ToProduction => {
                required(&self.to_production_id, "to_production_id", "TO_PRODUCTION_ID")
            }
            PushList::Blocked => required(&self.blocked_id, "blocked_id", "BLOCKED_ID"),
        }
    }
}
