//! User settings
//!
//! Read from a TOML file, then overridden from the environment. Every key
//! is optional; a missing file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use cadence_core::config::{clamp_rest, ElapsedPolicy, SessionConfig, DEFAULT_REST_S};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};

/// Settings file looked up when none is given
pub const DEFAULT_SETTINGS_PATH: &str = "cadence.toml";

/// Catalog file looked up when none is configured
pub const DEFAULT_CATALOG_PATH: &str = "workouts.json";

/// Cached copy of the last catalog that parsed
pub const DEFAULT_CACHE_PATH: &str = ".cadence/workouts.cache.json";

/// Environment override for the rest duration
pub const ENV_REST_SECONDS: &str = "CADENCE_REST_SECONDS";

/// Environment override for the catalog path
pub const ENV_CATALOG: &str = "CADENCE_CATALOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rest inserted between sets, group members, and exercises (seconds)
    pub rest_seconds: u32,
    pub elapsed_policy: ElapsedPolicy,
    /// Workout catalog (JSON)
    pub catalog: PathBuf,
    /// Fallback copy of the catalog; `None` disables caching
    pub cache: Option<PathBuf>,
    /// Ring the terminal bell on cues
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rest_seconds: DEFAULT_REST_S,
            elapsed_policy: ElapsedPolicy::default(),
            catalog: DEFAULT_CATALOG_PATH.into(),
            cache: Some(DEFAULT_CACHE_PATH.into()),
            sound: true,
        }
    }
}

impl Settings {
    /// Parse settings TOML
    pub fn parse(text: &str) -> CatalogResult<Self> {
        let mut settings: Settings = toml::from_str(text)?;
        settings.rest_seconds = clamp_rest(Some(settings.rest_seconds.into()));
        Ok(settings)
    }

    /// Load settings from `path`, or from [`DEFAULT_SETTINGS_PATH`]
    ///
    /// An explicit path must exist. The default path is optional.
    pub fn load(path: Option<&Path>) -> CatalogResult<Self> {
        let explicit = path.is_some();
        let path = path.unwrap_or(Path::new(DEFAULT_SETTINGS_PATH));

        let mut settings = match fs::read_to_string(path) {
            Ok(raw) => {
                debug!(path = %path.display(), "loaded settings file");
                Self::parse(&raw)?
            }
            Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(e) => return Err(CatalogError::io(path, e)),
        };

        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply overrides from a variable lookup (normally the environment)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup(ENV_REST_SECONDS) {
            match v.trim().parse::<i64>() {
                Ok(parsed) => self.rest_seconds = clamp_rest(Some(parsed)),
                Err(_) => debug!(value = %v, "ignoring unparsable {ENV_REST_SECONDS}"),
            }
        }

        if let Some(v) = lookup(ENV_CATALOG) {
            if !v.trim().is_empty() {
                self.catalog = PathBuf::from(v);
            }
        }
    }

    /// Session configuration for the sequencer
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            rest_s: self.rest_seconds,
            elapsed_policy: self.elapsed_policy,
            ..SessionConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.rest_seconds, 3);
        assert!(settings.sound);
    }

    #[test]
    fn test_parse() {
        let settings = Settings::parse(
            r#"
            rest_seconds = 10
            elapsed_policy = "include_rep_wait"
            catalog = "plans/home.json"
            sound = false
            "#,
        )
        .unwrap();

        assert_eq!(settings.rest_seconds, 10);
        assert_eq!(settings.elapsed_policy, ElapsedPolicy::IncludeRepWait);
        assert_eq!(settings.catalog, PathBuf::from("plans/home.json"));
        assert!(!settings.sound);

        let config = settings.session_config();
        assert_eq!(config.rest_s, 10);
        assert!(config.elapsed_policy.counts_rep_wait());
    }

    #[test]
    fn test_zero_rest_falls_back() {
        let settings = Settings::parse("rest_seconds = 0").unwrap();
        assert_eq!(settings.rest_seconds, DEFAULT_REST_S);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Settings::parse("rest_seconds = \"many\""),
            Err(CatalogError::Settings(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([(ENV_REST_SECONDS, "-2"), (ENV_CATALOG, "other.json")]);

        let mut settings = Settings::default();
        settings.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.rest_seconds, 1);
        assert_eq!(settings.catalog, PathBuf::from("other.json"));
    }

    #[test]
    fn test_unparsable_override_ignored() {
        let mut settings = Settings::default();
        settings.apply_overrides(|key| (key == ENV_REST_SECONDS).then(|| "soon".to_string()));
        assert_eq!(settings.rest_seconds, DEFAULT_REST_S);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Settings::load(Some(&missing)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cadence.toml");
        fs::write(&path, "rest_seconds = 7\nsound = false\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert!(!settings.sound);
    }
}
