use serde::{Deserialize, Serialize};
use smart_indent_engine::IndentConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the default config location.
pub const CONFIG_PATH_ENV: &str = "SMART_INDENT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {config_path}: {source}")]
    ConfigWriteError {
        config_path: PathBuf,
        source: std::io::Error,
    },
}

/// Persisted settings. Missing keys fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub indent: IndentConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            log::debug!("No config file at {}", config_path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        log::debug!("Loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    /// Loads the config, or the defaults when no file exists yet.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        let write_error = |source| ConfigError::ConfigWriteError {
            config_path: config_path.to_path_buf(),
            source,
        };
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        let content = self.to_toml_string()?;
        std::fs::write(config_path, content).map_err(write_error)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    /// Restores every setting to its default and writes the result out.
    pub fn reset_at<P: AsRef<Path>>(config_path: P) -> anyhow::Result<Self> {
        let config = Self::default();
        config.save_to_path(config_path)?;
        Ok(config)
    }

    pub fn reset() -> anyhow::Result<Self> {
        Self::reset_at(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        if let Ok(custom) = std::env::var(CONFIG_PATH_ENV) {
            let custom = PathBuf::from(custom);
            return Self::expand_path(&custom).unwrap_or(custom);
        }
        let config_dir = shellexpand::tilde("~/.config/smart-indent");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smart_indent_engine::{IndentMarker, MarkerPreset};
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut original = Config::default();
        original.indent.ignore_tables = false;
        original.indent.indent_marker = IndentMarker::from(MarkerPreset::Tab);

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_marker_written_as_preset_key() {
        let toml_str = toml::to_string(&Config::default()).unwrap();
        assert!(toml_str.contains(r#"indent_marker = "full-width""#));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
[indent]
ignore_headers = false
indent_marker = "two-spaces"
"#,
        )
        .unwrap();

        assert!(!config.indent.ignore_headers);
        assert!(config.indent.ignore_lists);
        assert_eq!(config.indent.indent_marker.as_str(), "  ");
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_literal_marker_accepted() {
        let config: Config = toml::from_str("[indent]\nindent_marker = \" \u{3000}\"").unwrap();
        assert_eq!(config.indent.indent_marker.as_str(), " \u{3000}");
    }

    #[test]
    fn test_invalid_marker_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[indent]\nindent_marker = \"xx\"\n").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let mut test_config = Config::default();
        test_config.indent.preserve_list_indent = false;

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        let mut custom = Config::default();
        custom.indent.ignore_code = false;
        custom.save_to_path(&config_file).unwrap();

        let reset = Config::reset_at(&config_file).unwrap();
        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(reset, Config::default());
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("SMART_INDENT_TEST_ROOT", "/test/env/path");
        }

        let path = PathBuf::from("$SMART_INDENT_TEST_ROOT/config.toml");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/config.toml")));

        unsafe {
            env::remove_var("SMART_INDENT_TEST_ROOT");
        }
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(Path::new("~/test/path")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("test/path"));
    }
}
