//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tp_core::AnalysisConfig;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Thresholds used by the analysis.
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(config_path).extract()
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TP_*, `__` separates sections)
        figment.merge(Env::prefixed("TP_").split("__"))
    }
}

/// Returns the platform-specific config directory for tp.
///
/// On Linux: `~/.config/tp`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use figment::Jail;

    #[test]
    fn test_dirs_config_path_ends_with_tp() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "tp");
    }

    #[test]
    fn test_defaults_without_sources() {
        Jail::expect_with(|jail| {
            let dir = jail.directory().to_path_buf();
            jail.set_env("HOME", dir.display());
            jail.set_env("XDG_CONFIG_HOME", dir.join(".config").display());
            let config = Config::load()?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_override() {
        Jail::expect_with(|jail| {
            let config_home = jail.directory().join(".config");
            jail.set_env("XDG_CONFIG_HOME", config_home.display());
            jail.create_file(
                "tp.toml",
                r"
                [analysis]
                packed_day_threshold = 3
                max_precipitation = 50.0
                ",
            )?;
            jail.set_env("TP_ANALYSIS__PACKED_DAY_THRESHOLD", "7");

            let config = Config::load_from(Some(Path::new("tp.toml")))?;
            assert_eq!(config.analysis.packed_day_threshold, 7);
            assert!((config.analysis.max_precipitation - 50.0).abs() < f64::EPSILON);
            assert_eq!(config.analysis.window_start_minute, 480);
            Ok(())
        });
    }
}
