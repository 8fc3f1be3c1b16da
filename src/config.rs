use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_SEARCH_SERVICE_URL: &str = "http://localhost:5000";
pub const DEFAULT_INGEST_SERVICE_URL: &str = "http://localhost:4000";

/// Which implementation answers searches.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// GitHub REST API, enriched with per-repository details
    #[default]
    Github,
    /// Backend search service at `search_service_url`
    Proxy,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "github" => Ok(BackendKind::Github),
            "proxy" => Ok(BackendKind::Proxy),
            other => Err(format!("unknown backend '{}' (expected github or proxy)", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendKind,
    /// Bearer token for the GitHub API
    pub github_token: Option<String>,
    pub github_api_url: Option<String>,
    pub search_service_url: Option<String>,
    pub ingest_service_url: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("backend", &self.backend)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("github_api_url", &self.github_api_url())
            .field("search_service_url", &self.search_service_url())
            .field("ingest_service_url", &self.ingest_service_url())
            .finish()
    }
}

impl Config {
    /// Config file first, then environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let contents = fs::read_to_string(&path)?;
                serde_json::from_str(&contents).map_err(|e| {
                    anyhow::anyhow!("Can't parse config file {}: {}", path.display(), e)
                })?
            }
            _ => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Catches values that would only fail later, mid-request.
    fn validate(&self) -> anyhow::Result<()> {
        if let Some(token) = &self.github_token {
            crate::github::bearer(token)
                .map_err(|_| anyhow::anyhow!("GITHUB_API_TOKEN contains characters not allowed in an HTTP header"))?;
        }
        Ok(())
    }

    pub fn config_path() -> Option<PathBuf> {
        let home = std::env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".config").join("reposearch").join("config.json"))
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(token) = var("GITHUB_API_TOKEN").filter(|t| !t.is_empty()) {
            self.github_token = Some(token);
        }
        if let Some(url) = var("GITHUB_API_URL") {
            self.github_api_url = Some(url);
        }
        if let Some(backend) = var("REPOSEARCH_BACKEND") {
            self.backend = backend.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(url) = var("REPOSEARCH_SEARCH_URL") {
            self.search_service_url = Some(url);
        }
        if let Some(url) = var("REPOSEARCH_INGEST_URL") {
            self.ingest_service_url = Some(url);
        }
        Ok(())
    }

    pub fn github_api_url(&self) -> &str {
        base_url(self.github_api_url.as_deref(), DEFAULT_GITHUB_API_URL)
    }

    pub fn search_service_url(&self) -> &str {
        base_url(self.search_service_url.as_deref(), DEFAULT_SEARCH_SERVICE_URL)
    }

    pub fn ingest_service_url(&self) -> &str {
        base_url(self.ingest_service_url.as_deref(), DEFAULT_INGEST_SERVICE_URL)
    }
}

fn base_url<'a>(configured: Option<&'a str>, default: &'a str) -> &'a str {
    configured.unwrap_or(default).trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_services() {
        let config = Config::default();
        assert_eq!(config.backend, BackendKind::Github);
        assert_eq!(config.github_api_url(), "https://api.github.com");
        assert_eq!(config.search_service_url(), "http://localhost:5000");
        assert_eq!(config.ingest_service_url(), "http://localhost:4000");
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config: Config =
            serde_json::from_str(r#"{"backend":"github","search_service_url":"http://file:1"}"#)
                .unwrap();
        config
            .apply_env(env(&[
                ("REPOSEARCH_BACKEND", "proxy"),
                ("REPOSEARCH_SEARCH_URL", "http://env:2/"),
                ("GITHUB_API_TOKEN", "ghp_secret"),
            ]))
            .unwrap();

        assert_eq!(config.backend, BackendKind::Proxy);
        assert_eq!(config.search_service_url(), "http://env:2");
        assert_eq!(config.github_token.as_deref(), Some("ghp_secret"));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let mut config = Config::default();
        assert!(config.apply_env(env(&[("REPOSEARCH_BACKEND", "gitlab")])).is_err());
    }

    #[test]
    fn token_with_control_characters_fails_validation() {
        let mut config = Config::default();
        config
            .apply_env(env(&[("GITHUB_API_TOKEN", "ghp_abc\ndef")]))
            .unwrap();
        assert!(config.validate().is_err());

        config.github_token = Some("ghp_abcdef".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn debug_output_hides_token() {
        let config = Config {
            github_token: Some("ghp_secret".into()),
            ..Config::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("ghp_secret"));
        assert!(printed.contains("<redacted>"));
    }
}
