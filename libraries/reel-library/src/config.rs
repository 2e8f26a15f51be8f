/// Library configuration
use reel_core::{ReelError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for assembling a library instance
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// `SQLite` connection string for the catalog
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Managed media directory, exclusively owned by the content store
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,

    /// Lifetime of playback capability handles, in seconds
    #[serde(default = "default_handle_ttl_seconds")]
    pub handle_ttl_seconds: i64,
}

impl LibraryConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `reel.toml` if present, then overrides with `REEL_`-prefixed
    /// environment variables (e.g. `REEL_MEDIA_DIR`).
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = PathBuf::from("reel.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        settings = settings.add_source(config::Environment::with_prefix("REEL").try_parsing(true));

        let config = settings
            .build()
            .map_err(|e| ReelError::internal(format!("config error: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| ReelError::internal(format!("config error: {e}")))
    }

    /// Handle TTL as a duration
    pub fn handle_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.handle_ttl_seconds)
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            media_dir: default_media_dir(),
            handle_ttl_seconds: default_handle_ttl_seconds(),
        }
    }
}

// Default values

fn default_database_url() -> String {
    "sqlite://./data/reel.db".to_string()
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("./data/media")
}

fn default_handle_ttl_seconds() -> i64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = LibraryConfig::default();
        assert_eq!(config.database_url, "sqlite://./data/reel.db");
        assert_eq!(config.media_dir, PathBuf::from("./data/media"));
        assert_eq!(config.handle_ttl(), chrono::Duration::seconds(300));
    }
}
