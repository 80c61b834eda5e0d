use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SnippetsConfig {
    pub database: Option<String>,
    pub log_file: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("snippets.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("snippets.db")
}

pub fn default_log_path() -> PathBuf {
    PathBuf::from("snippets.log")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<SnippetsConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: SnippetsConfig = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Paths an invocation runs with, after flags, config file and defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database: PathBuf,
    pub log_file: PathBuf,
}

impl Settings {
    /// Command-line flags win over the config file, which wins over defaults.
    pub fn resolve(
        database_flag: Option<PathBuf>,
        log_file_flag: Option<PathBuf>,
        config: Option<SnippetsConfig>,
    ) -> Self {
        let config = config.unwrap_or_default();
        Self {
            database: database_flag
                .or_else(|| config.database.map(PathBuf::from))
                .unwrap_or_else(default_database_path),
            log_file: log_file_flag
                .or_else(|| config.log_file.map(PathBuf::from))
                .unwrap_or_else(default_log_path),
        }
    }
}
