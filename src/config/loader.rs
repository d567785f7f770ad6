//! Configuration loading logic

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::schema::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration with fallback (from current working directory)
    ///
    /// Load priority:
    /// 1. Local config (.trak.toml in current directory)
    /// 2. Global config (~/.config/trak/config.toml)
    /// 3. Default config
    ///
    /// # Errors
    /// Returns an error if configuration files exist but cannot be read or parsed
    pub fn load() -> Result<Self> {
        Self::load_impl(None)
    }

    /// Load configuration with fallback (from specified repository root)
    ///
    /// Ensures .trak.toml is always loaded from the repository root, not from
    /// whichever subdirectory the command happens to run in.
    ///
    /// Load priority:
    /// 1. Local config (.trak.toml in `repo_root` directory)
    /// 2. Global config (~/.config/trak/config.toml)
    /// 3. Default config
    ///
    /// # Errors
    /// Returns an error if configuration files exist but cannot be read or parsed
    pub fn load_from_repo_root(repo_root: &Path) -> Result<Self> {
        Self::load_impl(Some(repo_root))
    }

    fn load_impl(repo_root: Option<&Path>) -> Result<Self> {
        // Try local config first
        let local_config = repo_root.map_or_else(Self::local_config_path, |root| {
            Self::local_config_path_from(root)
        });

        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        // Try global config
        if let Some(global_config) = Self::global_config_path() {
            if global_config.exists() {
                return Self::from_file(&global_config);
            }
        }

        // Return default config
        Ok(Self::default())
    }

    /// Get the local config path from a specific directory
    #[must_use]
    pub fn local_config_path_from(repo_root: &Path) -> PathBuf {
        repo_root.join(".trak.toml")
    }

    /// Get the local config path in the current directory
    #[must_use]
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".trak.toml")
    }

    /// Get the global config path
    /// Respects `XDG_CONFIG_HOME` environment variable on all platforms.
    /// Fallback: `$HOME/.config/trak/config.toml`
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;

        Some(config_home.join("trak").join("config.toml"))
    }
}
