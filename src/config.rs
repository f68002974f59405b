use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::Mode;
use crate::app_dirs::AppDirs;

pub const DEFAULT_WORDS_FILE: &str = "toeic_words.xlsx";
pub const DEFAULT_QUIZ_FILE: &str = "vs_quiz.xlsx";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub words_path: PathBuf,
    pub quiz_path: PathBuf,
    pub start_mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            words_path: PathBuf::from(DEFAULT_WORDS_FILE),
            quiz_path: PathBuf::from(DEFAULT_QUIZ_FILE),
            start_mode: Mode::Words,
        }
    }
}

/// Command line values that take precedence over the stored config
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub words_path: Option<PathBuf>,
    pub quiz_path: Option<PathBuf>,
    pub start_mode: Option<Mode>,
}

impl Config {
    pub fn with_overrides(self, overrides: Overrides) -> Self {
        Self {
            words_path: overrides.words_path.unwrap_or(self.words_path),
            quiz_path: overrides.quiz_path.unwrap_or(self.quiz_path),
            start_mode: overrides.start_mode.unwrap_or(self.start_mode),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
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
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("ignoring unreadable config {}: {e}", self.path.display());
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
