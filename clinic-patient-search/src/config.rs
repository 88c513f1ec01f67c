//! Settings for the HTTP patient search backend, loaded with figment

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Prefix of the environment variables that override file settings.
pub const ENV_PREFIX: &str = "CLINIC_";

pub const TOML_FILE: &str = "clinic.toml";
pub const YAML_FILE: &str = "clinic.yaml";

/// Errors raised while loading [`SearchConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source held a value of the wrong shape
    #[error("invalid search configuration: {0}")]
    Parse(#[from] Box<figment::Error>),

    /// Explicit config file with an extension we cannot read
    #[error("unsupported config format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Parse(Box::new(err))
    }
}

/// Where and how to query the backend patient search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the clinic backend, without the `/api` suffix
    pub base_url: String,
    /// Rows requested per search; large, because ranking happens client-side
    pub page_size: usize,
    /// Patient status filter passed through to the backend
    pub status: String,
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            page_size: 200,
            status: "all".to_string(),
            timeout_secs: 10,
        }
    }
}

impl SearchConfig {
    /// Load from defaults, `clinic.toml`, `clinic.yaml` and `CLINIC_*`
    /// environment variables. Later sources win.
    pub fn load() -> Result<Self, ConfigError> {
        debug!("Loading search configuration");
        trace!("Config files: {}, {}", TOML_FILE, YAML_FILE);
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            // missing files are skipped
            .merge(Toml::file(TOML_FILE))
            .merge(Yaml::file(YAML_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        debug!(base_url = %config.base_url, page_size = config.page_size, "Search configuration loaded");
        Ok(config)
    }

    /// Merge one explicit file over the defaults, picking the format from
    /// its extension.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading search configuration from {}", path.display());
        let defaults = Figment::from(Serialized::defaults(Self::default()));
        let figment = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => defaults.merge(Toml::file(path)),
            Some("yaml") | Some("yml") => defaults.merge(Yaml::file(path)),
            Some("json") => defaults.merge(Json::file(path)),
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.page_size, 200);
        assert_eq!(config.status, "all");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_load_without_sources_gives_defaults() {
        Jail::expect_with(|_jail| {
            assert_eq!(SearchConfig::load().unwrap(), SearchConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_precedence_order() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "clinic.toml",
                r#"
base_url = "http://toml.example"
page_size = 50
status = "active"
"#,
            )?;
            jail.create_file(
                "clinic.yaml",
                r#"
base_url: http://yaml.example
page_size: 75
"#,
            )?;
            jail.set_env("CLINIC_BASE_URL", "http://env.example");

            let config = SearchConfig::load().unwrap();
            assert_eq!(config.base_url, "http://env.example");
            assert_eq!(config.page_size, 75);
            assert_eq!(config.status, "active");
            assert_eq!(config.timeout_secs, 10);
            Ok(())
        });
    }

    #[test]
    fn test_load_from_explicit_file() {
        Jail::expect_with(|jail| {
            jail.create_file("site.json", r#"{ "timeout_secs": 3 }"#)?;
            let config = SearchConfig::load_from("site.json").unwrap();
            assert_eq!(config.timeout_secs, 3);
            assert_eq!(config.page_size, 200);
            Ok(())
        });
    }

    #[test]
    fn test_load_from_rejects_unknown_extension() {
        let err = SearchConfig::load_from("clinic.ini").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_bad_value_is_parse_error() {
        Jail::expect_with(|jail| {
            jail.set_env("CLINIC_PAGE_SIZE", "lots");
            assert!(matches!(SearchConfig::load(), Err(ConfigError::Parse(_))));
            Ok(())
        });
    }
}
