use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// GraphQL endpoint.  Points at AniList unless overridden.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// OAuth token for viewer queries.  Unauthenticated browsing works
    /// without one.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Entries requested per list page.
    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            page_size: default_page_size(),
        }
    }
}

fn default_endpoint() -> String {
    "https://graphql.anilist.co".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("aniview/{}", env!("CARGO_PKG_VERSION"))
}

fn default_page_size() -> i32 {
    20
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        config_dir().join("config.toml")
    }
}

fn config_dir() -> PathBuf {
    // On macOS and Linux, always use ~/.config/aniview/
    // (avoid macOS Application Support folder for consistency)
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("aniview")
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aniview")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api.endpoint.starts_with("https://"));
        assert!(config.api.token.is_none());
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.api.page_size, 20);
        assert!(Config::config_path().ends_with("aniview/config.toml"));
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            token = "abc123"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.token.as_deref(), Some("abc123"));
        assert_eq!(config.api.endpoint, default_endpoint());
        assert_eq!(config.api.page_size, 20);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        // First load writes the defaults out.
        let created = Config::load_from(&path).unwrap();
        assert!(path.exists());

        let mut edited = created.clone();
        edited.api.token = Some("token-xyz".to_string());
        edited.api.page_size = 7;
        edited.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.api.token.as_deref(), Some("token-xyz"));
        assert_eq!(reloaded.api.page_size, 7);
        assert_eq!(reloaded.api.endpoint, created.api.endpoint);
    }
}
