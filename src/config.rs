use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::error::Result;
use crate::session::{SessionConfig, RESTART_DELAY, SECRET_PASSWORD, SESSION_DURATION_SECS};

pub const DEFAULT_PARTICLE_COUNT: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub duration_secs: u64,
    pub secret: String,
    pub restart_delay_ms: u64,
    pub particles: bool,
    pub particle_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: SESSION_DURATION_SECS,
            secret: SECRET_PASSWORD.to_string(),
            restart_delay_ms: RESTART_DELAY.as_millis() as u64,
            particles: true,
            particle_count: DEFAULT_PARTICLE_COUNT,
        }
    }
}

impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            duration_secs: cfg.duration_secs,
            secret: cfg.secret.clone(),
            restart_delay: Duration::from_millis(cfg.restart_delay_ms),
        }
    }
}

pub trait ConfigStore {
    /// Never fails: a missing or unreadable file yields defaults.
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => cfg,
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), error = %err, "ignoring unparsable config");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
