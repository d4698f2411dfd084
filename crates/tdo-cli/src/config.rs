use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tdo_core::auth::DEFAULT_TOKEN_PATH;
use tdo_core::client::API_BASE_URL;
use tdo_core::error::CoreError;
use tdo_core::models::Priority;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".todoist-cli.json";
pub const ENV_PREFIX: &str = "TDO_";

/// User preferences, loaded once per invocation and never written back.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// 1Password reference for the API token
    pub token_path: Option<String>,
    /// Project name used by `add` when `--project` is not given
    pub default_project: Option<String>,
    /// Priority used by `add` when `--priority` is not given
    pub default_priority: Priority,
    pub use_colors: bool,
    pub verbose: bool,
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token_path: Some(DEFAULT_TOKEN_PATH.to_string()),
            default_project: None,
            default_priority: Priority::Low,
            use_colors: true,
            verbose: false,
            api_url: API_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads defaults, then the preferences file, then `TDO_*` variables.
    ///
    /// A missing file is fine; an unreadable or malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, CoreError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_path(),
        };
        debug!(path = %path.display(), exists = path.exists(), "loading preferences");

        Self::figment(&path).extract().map_err(|e| {
            CoreError::Configuration(format!("could not load {}: {}", path.display(), e))
        })
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Json::file_exact(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}

pub fn default_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    // Jail serialises these tests, so TDO_* variables never leak between them.

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load(Some(Path::new("absent.json"))).expect("config loads");
            assert_eq!(config, Config::default());
            assert_eq!(config.token_path.as_deref(), Some("op://Private/Todoist/token"));
            Ok(())
        });
    }

    #[test]
    fn relative_path_is_not_searched_for_in_parent_directories() {
        Jail::expect_with(|jail| {
            jail.create_file("prefs.json", r#"{ "default_priority": 4 }"#)?;
            jail.create_dir("nested")?;
            jail.change_dir("nested")?;

            let config = Config::load(Some(Path::new("prefs.json"))).expect("config loads");
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn file_values_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "prefs.json",
                r#"{
                    "token_path": "op://Work/Todoist/credential",
                    "default_project": "Errands",
                    "default_priority": 3,
                    "use_colors": false,
                    "some_future_key": [1, 2, 3]
                }"#,
            )?;

            let config = Config::load(Some(Path::new("prefs.json"))).expect("config loads");
            assert_eq!(config.token_path.as_deref(), Some("op://Work/Todoist/credential"));
            assert_eq!(config.default_project.as_deref(), Some("Errands"));
            assert_eq!(config.default_priority, Priority::High);
            assert!(!config.use_colors);
            assert!(!config.verbose);
            Ok(())
        });
    }

    #[test]
    fn malformed_json_is_a_configuration_error() {
        Jail::expect_with(|jail| {
            jail.create_file("prefs.json", "{ \"use_colors\": tru")?;
            let err = Config::load(Some(Path::new("prefs.json"))).unwrap_err();
            assert!(matches!(err, CoreError::Configuration(_)), "got {err:?}");
            Ok(())
        });
    }

    #[test]
    fn out_of_range_priority_is_a_configuration_error() {
        Jail::expect_with(|jail| {
            jail.create_file("prefs.json", r#"{ "default_priority": 7 }"#)?;
            let err = Config::load(Some(Path::new("prefs.json"))).unwrap_err();
            assert!(matches!(err, CoreError::Configuration(_)), "got {err:?}");
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("prefs.json", r#"{ "use_colors": true, "verbose": false }"#)?;
            jail.set_env("TDO_USE_COLORS", "false");
            jail.set_env("TDO_API_URL", "http://127.0.0.1:9999");

            let config = Config::load(Some(Path::new("prefs.json"))).expect("config loads");
            assert!(!config.use_colors);
            assert_eq!(config.api_url, "http://127.0.0.1:9999");
            Ok(())
        });
    }
}
