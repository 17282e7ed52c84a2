use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::stream::Stream;

/// Size cap and backup retention for one stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    pub max_bytes: u64,
    pub backup_count: usize,
}

impl StreamConfig {
    pub fn new(max_bytes: u64, backup_count: usize) -> Self {
        StreamConfig {
            max_bytes,
            backup_count,
        }
    }
}

/// Logging-core configuration: the log directory plus per-stream limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_user_actions")]
    pub user_actions: StreamConfig,
    #[serde(default = "default_system_events")]
    pub system_events: StreamConfig,
    #[serde(default = "default_errors")]
    pub errors: StreamConfig,
}

fn default_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_user_actions() -> StreamConfig {
    StreamConfig::new(10 * 1024 * 1024, 5)
}

fn default_system_events() -> StreamConfig {
    StreamConfig::new(5 * 1024 * 1024, 3)
}

fn default_errors() -> StreamConfig {
    StreamConfig::new(5 * 1024 * 1024, 3)
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            dir: default_dir(),
            user_actions: default_user_actions(),
            system_events: default_system_events(),
            errors: default_errors(),
        }
    }
}

impl LogConfig {
    /// Default limits rooted at the given directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        LogConfig {
            dir: dir.into(),
            ..LogConfig::default()
        }
    }

    /// Read a config from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<LogConfig> {
        if !path.exists() {
            return Ok(LogConfig::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: LogConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn stream(&self, stream: Stream) -> &StreamConfig {
        match stream {
            Stream::UserActions => &self.user_actions,
            Stream::SystemEvents => &self.system_events,
            Stream::Errors => &self.errors,
        }
    }
}

pub fn write_default_config(path: &Path) -> Result<()> {
    let config = LogConfig::default();
    let content = toml::to_string_pretty(&config)?;
    std::fs::write(path, content)?;
    Ok(())
}
