//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `FORGE_*` environment variables, `__` between sections
//!    (`FORGE_SERVICE__PORT=3000`)
//! 3. Config file (`--config FILE`, else the platform config dir)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File, FileFormat};
use anyhow::Context as _;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use forge_core::domain::{ServiceEndpoint, hello};

const ENV_PREFIX: &str = "FORGE";
const CONFIG_FILE: &str = "config.toml";
const EVENTS_FILE: &str = "events.jsonl";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    /// Where `forge serve` listens.
    pub service: ServiceEndpoint,
    pub tracking: TrackingConfig,
    pub templates: TemplateConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Event log; defaults to `events.jsonl` in the platform data dir.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// `<kind>/<target>` template directories that shadow the built-ins.
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enables a daily-rolling log file in this directory.
    pub directory: Option<PathBuf>,
}

impl AppConfig {
    /// Layer defaults, the config file and the environment.
    ///
    /// With `must_exist`, an explicit `config_file` has to be present. The
    /// default location is always optional.
    pub fn load(config_file: Option<&Path>, must_exist: bool) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(p) => (p.to_path_buf(), must_exist),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        Config::builder()
            .set_default("output.no_color", false)?
            .set_default("service.host", hello::DEFAULT_HOST)?
            .set_default("service.port", i64::from(hello::DEFAULT_PORT))?
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from '{}'", path.display()))?
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs`, falling back to `.forge.toml` in the
    /// current directory.
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|d| d.config_dir().join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(".forge.toml"))
    }

    pub fn tracking_path(&self) -> PathBuf {
        self.tracking.path.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|d| d.data_dir().join(EVENTS_FILE))
                .unwrap_or_else(|| PathBuf::from(".forge").join(EVENTS_FILE))
        })
    }

    /// The configured endpoint, with `port` taking precedence.
    pub fn endpoint(&self, port: Option<u16>) -> ServiceEndpoint {
        match port {
            Some(port) => self.service.clone().with_port(port),
            None => self.service.clone(),
        }
    }

    /// Look up a dotted key such as `service.port`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let root = serde_json::to_value(self).ok()?;
        key.split('.')
            .try_fold(root, |value, part| value.get(part).cloned())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "forge", "forge")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_listen_on_8080() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.service.to_string(), "0.0.0.0:8080");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("forge.toml");
        fs::write(
            &path,
            "[service]\nport = 9000\n\n[tracking]\npath = \"/tmp/forge-events.jsonl\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path), true).unwrap();
        assert_eq!(cfg.service.host, "0.0.0.0");
        assert_eq!(cfg.service.port, 9000);
        assert_eq!(cfg.tracking_path(), PathBuf::from("/tmp/forge-events.jsonl"));
    }

    #[test]
    fn explicit_missing_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing), true).is_err());
        assert_eq!(AppConfig::load(Some(&missing), false).unwrap().service.port, 8080);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("forge.toml");
        fs::write(&path, "[service\nport = ").unwrap();
        assert!(AppConfig::load(Some(&path), true).is_err());
    }

    #[test]
    fn port_flag_wins() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.endpoint(None).port, 8080);
        assert_eq!(cfg.endpoint(Some(3000)).to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn dotted_lookup() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("service.port"), Some(serde_json::json!(8080)));
        assert_eq!(cfg.get("output.no_color"), Some(serde_json::json!(false)));
        assert_eq!(cfg.get("tracking.path"), Some(serde_json::Value::Null));
        assert_eq!(cfg.get("service.nope"), None);
    }

    #[test]
    fn default_paths_are_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
        assert!(AppConfig::default().tracking_path().ends_with(EVENTS_FILE));
    }
}
