//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use monogram::Options;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default avatar options, overridden by CLI flags.
    #[serde(default)]
    pub defaults: Options,
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Merge CLI options over the configured defaults.
    #[must_use]
    pub fn options_with(&self, overrides: &Options) -> Options {
        let mut options = self.defaults.clone();
        options.merge(overrides);
        options
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `MONOGRAM_CONFIG` environment variable
/// 3. `~/.config/monogram/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("MONOGRAM_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/monogram/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/monogram/config.toml")
    } else {
        PathBuf::from("monogram.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monogram::{keys, OptionValue};

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.defaults.is_empty());
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert!(config.defaults.is_empty());
    }

    #[test]
    fn load_valid_toml() {
        let dir = std::env::temp_dir().join("monogram_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r##"
[defaults]
size = 64
font_color = "#FAFAFA"
upcase = false
format = "jpeg"
quality = 85.0
"##,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.defaults.get(keys::SIZE), Some(&OptionValue::Int(64)));
        assert_eq!(config.defaults.get(keys::FONT_COLOR), Some(&OptionValue::Text("#FAFAFA".into())));
        assert_eq!(config.defaults.get(keys::UPCASE), Some(&OptionValue::Bool(false)));
        assert_eq!(config.defaults.get(keys::FORMAT), Some(&OptionValue::Text("jpeg".into())));
        assert_eq!(config.defaults.get(keys::QUALITY), Some(&OptionValue::Float(85.0)));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_invalid_toml() {
        let dir = std::env::temp_dir().join("monogram_config_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn cli_options_win_over_defaults() {
        let config = Config { defaults: Options::new().with(keys::SIZE, 64).with(keys::FORMAT, "jpeg") };
        let merged = config.options_with(&Options::new().with(keys::SIZE, 128));
        assert_eq!(merged.get(keys::SIZE), Some(&OptionValue::Int(128)));
        assert_eq!(merged.get(keys::FORMAT), Some(&OptionValue::Text("jpeg".into())));
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some("/tmp/my-config.toml"));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
