//! Startup configuration.
//!
//! Settings are layered, lowest precedence first: built-in defaults, an
//! optional TOML file, `JOINWATCH_*` environment variables, then command
//! line overrides.
//!
//! ```toml
//! endpoint = "http://pipeline.internal:8080"
//! log_file = "/var/log/joinwatch.log"
//! ```
//!
//! The refresh period and the `/metrics` path are fixed and cannot be
//! configured.

use std::path::{Path, PathBuf};

use ::config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;

/// Server base URL used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Log file used when nothing else is configured.
pub const DEFAULT_LOG_FILE: &str = "joinwatch.log";

/// Environment variable prefix (`JOINWATCH_ENDPOINT`, `JOINWATCH_LOG_FILE`).
pub const ENV_PREFIX: &str = "JOINWATCH";

/// Resolved settings for one run of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Base URL of the pipeline server; `/metrics` is appended.
    pub endpoint: String,
    /// Where log output is written while the TUI owns the terminal.
    pub log_file: PathBuf,
}

/// Values supplied on the command line, applied last.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings from defaults, an optional config file, the
    /// environment and command line overrides.
    pub fn load(config_path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, None, overrides)
    }

    /// Like [`Settings::load`], but reads `JOINWATCH_*` variables from `env`
    /// instead of the process environment when it is given.
    pub fn load_with_env(
        config_path: Option<&Path>,
        env: Option<Map<String, String>>,
        overrides: Overrides,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("log_file", DEFAULT_LOG_FILE)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .set_override_option("endpoint", overrides.endpoint)?
            .set_override_option(
                "log_file",
                overrides
                    .log_file
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None, Overrides::default()).unwrap();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file("endpoint = \"http://pipeline:9000\"\n");
        let settings = Settings::load(Some(file.path()), Overrides::default()).unwrap();
        assert_eq!(settings.endpoint, "http://pipeline:9000");
        assert_eq!(settings.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = toml_file(
            "endpoint = \"http://pipeline:9000\"\nlog_file = \"/tmp/from-file.log\"\n",
        );
        let overrides = Overrides {
            endpoint: Some("http://cli:1234".to_string()),
            log_file: None,
        };
        let settings = Settings::load(Some(file.path()), overrides).unwrap();
        assert_eq!(settings.endpoint, "http://cli:1234");
        assert_eq!(settings.log_file, PathBuf::from("/tmp/from-file.log"));
    }

    fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_env_overrides_file() {
        let file = toml_file(
            "endpoint = \"http://pipeline:9000\"\nlog_file = \"/tmp/from-file.log\"\n",
        );
        let settings = Settings::load_with_env(
            Some(file.path()),
            env(&[("JOINWATCH_ENDPOINT", "http://from-env:7000")]),
            Overrides::default(),
        )
        .unwrap();
        assert_eq!(settings.endpoint, "http://from-env:7000");
        assert_eq!(settings.log_file, PathBuf::from("/tmp/from-file.log"));
    }

    #[test]
    fn test_env_log_file_over_default() {
        let settings = Settings::load_with_env(
            None,
            env(&[("JOINWATCH_LOG_FILE", "/tmp/from-env.log")]),
            Overrides::default(),
        )
        .unwrap();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.log_file, PathBuf::from("/tmp/from-env.log"));
    }

    #[test]
    fn test_cli_overrides_env() {
        let overrides = Overrides {
            endpoint: Some("http://cli:1234".to_string()),
            log_file: None,
        };
        let settings = Settings::load_with_env(
            None,
            env(&[
                ("JOINWATCH_ENDPOINT", "http://from-env:7000"),
                ("JOINWATCH_LOG_FILE", "/tmp/from-env.log"),
            ]),
            overrides,
        )
        .unwrap();
        assert_eq!(settings.endpoint, "http://cli:1234");
        assert_eq!(settings.log_file, PathBuf::from("/tmp/from-env.log"));
    }

    #[test]
    fn test_unprefixed_env_is_ignored() {
        let settings = Settings::load_with_env(
            None,
            env(&[("ENDPOINT", "http://elsewhere:1")]),
            Overrides::default(),
        )
        .unwrap();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = Settings::load(
            Some(Path::new("/nonexistent/joinwatch.toml")),
            Overrides::default(),
        );
        assert!(result.is_err());
    }
}
