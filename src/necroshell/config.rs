use crate::error::{Result, ShellError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PROMPT: &str = "necro> ";
const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Configuration for the shell, stored as config.json in the config dir
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShellConfig {
    /// Prompt string printed before each read (e.g. "necro> ")
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Ring-buffer capacity for command history
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Override for the save-file path; `None` uses the home default
    #[serde(default)]
    pub save_path: Option<PathBuf>,

    /// Override for the history-file path; `None` uses the home default
    #[serde(default)]
    pub history_path: Option<PathBuf>,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            save_path: None,
            history_path: None,
        }
    }
}

impl ShellConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ShellError::Io)?;
        let config: ShellConfig =
            serde_json::from_str(&content).map_err(ShellError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ShellError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ShellError::Serialization)?;
        fs::write(config_path, content).map_err(ShellError::Io)?;
        Ok(())
    }
}
