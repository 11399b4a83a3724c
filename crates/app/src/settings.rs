//! Handles settings for the application.
//!
//! Sources, lowest to highest priority: built-in defaults, an optional TOML
//! file (`config/donors.toml` or `--config`), `DONORS__SECTION__KEY`
//! environment variables, then command-line flags.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/donors.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    /// Log level for the `donors` and `engine` targets.
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Database {
    pub url: String,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            url: "sqlite:./donors.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Session {
    /// File remembering the logged-in username.
    pub path: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            path: "config/session.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Auth {
    /// Whether update/delete commands need a logged-in user.
    pub require_login: bool,
}

impl Default for Auth {
    fn default() -> Self {
        Self {
            require_login: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub database: Database,
    pub session: Session,
    pub auth: Auth,
}

impl Settings {
    /// Load settings from `config_path` (or the default path) and the
    /// environment, then apply the command-line database override.
    pub fn load(config_path: Option<&str>, database_url: Option<String>) -> Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        let settings = Config::builder()
            .add_source(File::with_name(path).required(config_path.is_some()))
            .add_source(
                Environment::with_prefix("DONORS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = settings.try_deserialize()?;
        if let Some(url) = database_url {
            settings.database.url = url;
        }
        Ok(settings)
    }
}
