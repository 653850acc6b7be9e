use super::app_config::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading configuration or resolving credentials.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("invalid repository '{0}', expected owner/repo")]
    InvalidRepository(String),
    #[error("no GitHub token available: {0}")]
    MissingGithubToken(String),
    #[error("no Misskey API token available")]
    MissingMisskeyToken,
}

/// Reads [`AppConfig`] from a TOML file.
pub struct ConfigLoader {
    default_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader looking in the platform config directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_path: AppConfig::default_config_path(),
        }
    }

    /// Creates a loader with a specific default file (useful for testing).
    #[must_use]
    pub fn with_default_path(path: PathBuf) -> Self {
        Self {
            default_path: Some(path),
        }
    }

    /// Loads the application configuration.
    ///
    /// An explicitly given file must exist; a missing default file yields the
    /// built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        if let Some(path) = path_override {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::read(path);
        }

        match &self.default_path {
            Some(path) if path.exists() => Self::read(path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(AppConfig::default())
            }
        }
    }

    fn read(path: &Path) -> Result<AppConfig, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str::<AppConfig>(&content)?;
        info!(path = %path.display(), "Loaded config file");
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::with_default_path(dir.path().join("config.toml"));

        let config = loader.load(None).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_default_file_is_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "per_page = 30").unwrap();
        let loader = ConfigLoader::with_default_path(path);

        assert_eq!(loader.load(None).unwrap().per_page, 30);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::with_default_path(dir.path().join("config.toml"));

        let result = loader.load(Some(&dir.path().join("other.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_attempts = [").unwrap();
        let loader = ConfigLoader::with_default_path(path.clone());

        assert!(matches!(
            loader.load(Some(&path)),
            Err(ConfigError::TomlDe(_))
        ));
    }
}
