//! Configuration loading and validation.
//!
//! Sources are merged in precedence order: built-in defaults, then the
//! user's `marquee.toml` (in the platform config directory), then
//! `MARQUEE_*` environment variables. Nested keys use `__` in the
//! environment, e.g. `MARQUEE_CACHE__TTL__MOVIES_SECS=3600`.

pub mod error;

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, Result};

const CONFIG_FILENAME: &str = "marquee.toml";
const CACHE_FILENAME: &str = "cache.db";
const ENV_PREFIX: &str = "MARQUEE_";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheSection,
}

impl Default for Config {
    fn default() -> Self {
        Self { cache: CacheSection::default() }
    }
}

/// Cache database location and freshness settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSection {
    /// Explicit database path; defaults to the platform data directory.
    pub path: Option<PathBuf>,
    pub ttl: TtlSection,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self { path: None, ttl: TtlSection::default() }
    }
}

/// Per-content-type TTLs, in seconds.
///
/// Feeds churn at very different rates: discovery ordering shifts hourly,
/// while a credit list is effectively immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtlSection {
    pub movies_secs: u64,
    pub series_secs: u64,
    pub episodes_secs: u64,
    pub credits_secs: u64,
}

impl Default for TtlSection {
    fn default() -> Self {
        Self {
            movies_secs: 12 * 60 * 60,
            series_secs: 12 * 60 * 60,
            episodes_secs: 24 * 60 * 60,
            credits_secs: 7 * 24 * 60 * 60,
        }
    }
}

impl TtlSection {
    pub fn movies(&self) -> Duration {
        Duration::from_secs(self.movies_secs)
    }

    pub fn series(&self) -> Duration {
        Duration::from_secs(self.series_secs)
    }

    pub fn episodes(&self) -> Duration {
        Duration::from_secs(self.episodes_secs)
    }

    pub fn credits(&self) -> Duration {
        Duration::from_secs(self.credits_secs)
    }
}

impl Config {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self> {
        let figment = Self::figment()?;
        Self::from_figment(figment)
    }

    /// The figment this configuration is extracted from, useful for tests
    /// and for callers that want to stack extra providers.
    pub fn figment() -> Result<Figment> {
        let config_file = Self::project_dirs()?.config_dir().join(CONFIG_FILENAME);
        Ok(Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract().or_raise(|| ErrorKind::Invalid)?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Resolved path of the cache database.
    ///
    /// Uses the explicit `cache.path` setting when present, otherwise the
    /// platform data directory.
    pub fn cache_path(&self) -> Result<PathBuf> {
        match &self.cache.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::project_dirs()?.data_dir().join(CACHE_FILENAME)),
        }
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "marquee", "marquee").ok_or_raise(|| ErrorKind::Directories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.cache.path.is_none());
        assert_eq!(config.cache.ttl.movies(), Duration::from_secs(12 * 60 * 60));
        assert_eq!(config.cache.ttl.credits(), Duration::from_secs(7 * 24 * 60 * 60));
    }

    #[test]
    fn test_env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("MARQUEE_CACHE__TTL__MOVIES_SECS", "60");
            let figment = Figment::from(Serialized::defaults(Config::default()))
                .merge(Env::prefixed(ENV_PREFIX).split("__"));
            let config = Config::from_figment(figment).unwrap();
            assert_eq!(config.cache.ttl.movies(), Duration::from_secs(60));
            // Untouched keys keep their defaults.
            assert_eq!(config.cache.ttl.series(), Duration::from_secs(12 * 60 * 60));
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "marquee.toml",
                r#"
                    [cache]
                    path = "/tmp/elsewhere.db"

                    [cache.ttl]
                    episodes_secs = 120
                "#,
            )?;
            let figment =
                Figment::from(Serialized::defaults(Config::default())).merge(Toml::file("marquee.toml"));
            let config = Config::from_figment(figment).unwrap();
            assert_eq!(config.cache.path, Some(PathBuf::from("/tmp/elsewhere.db")));
            assert_eq!(config.cache.ttl.episodes(), Duration::from_secs(120));
            Ok(())
        });
    }

    #[test]
    fn test_explicit_cache_path_wins() {
        let mut config = Config::default();
        config.cache.path = Some(PathBuf::from("/tmp/cache.db"));
        assert_eq!(config.cache_path().unwrap(), PathBuf::from("/tmp/cache.db"));
    }
}
