mod api;
mod defaults;
mod validation;

use crate::cli::Args;
use crate::error::SaarthiError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub use api::ApiConfig;
pub use defaults::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use validation::{expand_home, normalize_base_url};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    #[serde(
        default = "defaults::default_sidebar",
        skip_serializing_if = "defaults::is_default_sidebar"
    )]
    pub sidebar: bool,
    #[serde(default)]
    pub verbose: Option<bool>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            sidebar: defaults::default_sidebar(),
            verbose: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JsonConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
    /// `None` when no data directory could be determined
    pub data_dir: Option<PathBuf>,
    pub ephemeral: bool,
    pub sidebar: bool,
    pub verbose: bool,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> crate::error::Result<Self> {
        let json_config = match JsonConfig::load() {
            Ok(config) => config,
            Err(e) => {
                // A broken file should not lock the user out of the client
                crate::ui::display_warning(&format!("{:#}", e));
                JsonConfig::default()
            }
        };
        Self::from_sources(args, &json_config, |name| std::env::var(name).ok())
    }

    /// Resolve every setting: CLI args > env vars > config file > default
    pub fn from_sources(
        args: &Args,
        json_config: &JsonConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> crate::error::Result<Self> {
        let expand = |value: String| validation::expand_with(&value, &env);

        let base_url = args
            .base_url
            .clone()
            .or_else(|| env("SAARTHI_BASE_URL"))
            .or(json_config.api.base_url.clone().map(expand))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = normalize_base_url(&base_url).map_err(SaarthiError::ConfigError)?;

        let timeout_secs = match args.timeout_secs {
            Some(secs) => secs,
            None => match env("SAARTHI_TIMEOUT") {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| {
                        SaarthiError::ConfigError(format!(
                            "SAARTHI_TIMEOUT is not a number: {:?}",
                            raw
                        ))
                    })?,
                None => json_config
                    .api
                    .timeout_secs
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
        };
        if timeout_secs == 0 {
            return Err(SaarthiError::ConfigError(
                "timeout must be at least one second".to_string(),
            ));
        }

        let data_dir = args
            .data_dir
            .clone()
            .or_else(|| env("SAARTHI_DATA_DIR").map(|dir| expand_home(&dir)))
            .or_else(|| {
                json_config
                    .storage
                    .data_dir
                    .clone()
                    .map(|dir| expand_home(&expand(dir)))
            })
            .or_else(crate::session::FileStorage::default_dir);

        let verbose = args.verbose
            || env("SAARTHI_VERBOSE")
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
                .or(json_config.ui.verbose)
                .unwrap_or(false);

        let sidebar = !args.no_sidebar && json_config.ui.sidebar;

        Ok(Config {
            base_url,
            timeout_secs,
            data_dir,
            ephemeral: args.ephemeral,
            sidebar,
            verbose,
        })
    }
}

impl JsonConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(JsonConfig::default())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&contents).with_context(|| {
                format!("Failed to parse YAML config file: {}", path.display())
            })?
        } else {
            serde_json::from_str(&contents).with_context(|| {
                format!("Failed to parse JSON config file: {}", path.display())
            })?
        };
        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".saarthi.yaml"),
            PathBuf::from(".saarthi.yml"),
            PathBuf::from(".saarthi.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("saarthi");
            paths.push(config_dir.join("saarthi.yaml"));
            paths.push(config_dir.join("saarthi.yml"));
            paths.push(config_dir.join("saarthi.json"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_any_source() {
        let config = Config::from_sources(&Args::default(), &JsonConfig::default(), env_from(&[]))
            .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.sidebar);
        assert!(!config.verbose);
    }

    #[test]
    fn test_cli_beats_env_beats_file() {
        let mut json_config = JsonConfig::default();
        json_config.api.base_url = Some("http://file:1".to_string());

        let env = env_from(&[("SAARTHI_BASE_URL", "http://env:2")]);
        let config = Config::from_sources(&Args::default(), &json_config, &env).unwrap();
        assert_eq!(config.base_url, "http://env:2");

        let args = Args {
            base_url: Some("http://cli:3/".to_string()),
            ..Args::default()
        };
        let config = Config::from_sources(&args, &json_config, &env).unwrap();
        assert_eq!(config.base_url, "http://cli:3");
    }

    #[test]
    fn test_file_values_expand_env_vars() {
        let mut json_config = JsonConfig::default();
        json_config.api.base_url = Some("http://${CHAT_HOST}:5000".to_string());
        let config = Config::from_sources(
            &Args::default(),
            &json_config,
            env_from(&[("CHAT_HOST", "backend")]),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://backend:5000");
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let result = Config::from_sources(
            &Args::default(),
            &JsonConfig::default(),
            env_from(&[("SAARTHI_TIMEOUT", "soon")]),
        );
        assert!(matches!(result, Err(SaarthiError::ConfigError(_))));
    }

    #[test]
    fn test_bad_base_url_is_a_config_error() {
        let args = Args {
            base_url: Some("localhost:5000".to_string()),
            ..Args::default()
        };
        let result = Config::from_sources(&args, &JsonConfig::default(), env_from(&[]));
        match result {
            Err(SaarthiError::ConfigError(message)) => assert!(message.contains("http://")),
            other => panic!("expected ConfigError, got {:?}", other.map(|c| c.base_url)),
        }
    }

    #[test]
    fn test_yaml_config_parses() {
        let config: JsonConfig = serde_yaml::from_str(
            "api:\n  base_url: http://chat:8080\n  timeout_secs: 5\nui:\n  sidebar: false\n",
        )
        .unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://chat:8080"));
        assert_eq!(config.api.timeout_secs, Some(5));
        assert!(!config.ui.sidebar);
        assert!(config.storage.data_dir.is_none());
    }
}
