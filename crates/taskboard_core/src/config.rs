//! Application configuration.
//!
//! # Responsibility
//! - Describe runtime settings (store location, logging, sign-in route, user).
//! - Load them from a TOML file, falling back to defaults per field.

use crate::logging::default_log_level;
use crate::model::user::User;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE_NAME: &str = "taskboard.sqlite3";
pub const DEFAULT_SIGNIN_ROUTE: &str = "/signin";
pub const DEFAULT_USER_ID: &str = "local";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub signin_route: String,
    pub user: UserConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            signin_route: DEFAULT_SIGNIN_ROUTE.to_string(),
            user: UserConfig::default(),
        }
    }
}

/// Identity used when the caller signs in from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserConfig {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_USER_ID.to_string(),
            name: None,
            email: None,
        }
    }
}

impl From<UserConfig> for User {
    fn from(value: UserConfig) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DEFAULT_SIGNIN_ROUTE};
    use std::path::{Path, PathBuf};

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            db_path = "/tmp/tasks.db"

            [user]
            id = "u-42"
            email = "ada@example.com"
            "#,
            Path::new("inline.toml"),
        )
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/tasks.db"));
        assert_eq!(config.signin_route, DEFAULT_SIGNIN_ROUTE);
        assert_eq!(config.user.id, "u-42");
        assert_eq!(config.user.name, None);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = AppConfig::from_toml_str("colour = 'red'", Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
