//! Configuration management for reindent.
//!
//! This module provides the [`Config`] struct which controls the indentation
//! geometry and which files are picked up. Configuration can be loaded from:
//! - TOML files (`reindent.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being processed up to the filesystem root, plus the user's home directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::format::IndentParams;

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["reindent.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try HOME environment variable first (works on Unix and some Windows setups)
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_tab_width() -> usize {
    4
}
fn default_indent_unit() -> usize {
    4
}
fn default_output_indent() -> usize {
    2
}
fn default_extensions() -> Vec<String> {
    vec!["h".to_string(), "cpp".to_string()]
}

/// Main configuration struct for reindent
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Distance between input tab stops (default: 4)
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Column granularity valid input indentation must be a multiple of (default: 4)
    #[serde(default = "default_indent_unit")]
    pub indent_unit: usize,

    /// Output spaces per indentation unit (default: 2)
    #[serde(default = "default_output_indent")]
    pub output_indent: usize,

    /// File extensions picked up when scanning directories (default: h, cpp)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub tab_width: Option<usize>,
    pub indent_unit: Option<usize>,
    pub output_indent: Option<usize>,
    pub extensions: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tab_width: default_tab_width(),
            indent_unit: default_indent_unit(),
            output_indent: default_output_indent(),
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Largest accepted tab width, indentation unit or output indent
    const MAX_WIDTH: usize = 16;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        let widths = [
            ("tab_width", self.tab_width),
            ("indent_unit", self.indent_unit),
            ("output_indent", self.output_indent),
        ];
        for (name, value) in widths {
            if value == 0 {
                return Some(format!("{name} must be at least 1"));
            }
            if value > Self::MAX_WIDTH {
                return Some(format!(
                    "{name} {value} exceeds maximum of {}",
                    Self::MAX_WIDTH
                ));
            }
        }
        if let Some(ext) = self.extensions.iter().find(|e| e.trim_start_matches('.').is_empty()) {
            return Some(format!("invalid extension {ext:?}"));
        }
        None
    }

    /// Indentation geometry used by the reindenter
    ///
    /// Fails when any width is zero.
    pub fn indent_params(&self) -> anyhow::Result<IndentParams> {
        IndentParams::new(self.tab_width, self.indent_unit, self.output_indent)
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.tab_width {
            self.tab_width = v;
        }
        if let Some(v) = partial.indent_unit {
            self.indent_unit = v;
        }
        if let Some(v) = partial.output_indent {
            self.output_indent = v;
        }
        if let Some(v) = &partial.extensions {
            self.extensions.clone_from(v);
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Add home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        // Start from the file's parent directory (or the path itself if it's a directory)
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Path doesn't exist, use current directory
            std::env::current_dir().ok()
        };

        // Collect config files from parent directories (from root to current)
        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        let mut config = Self::default();
        for path in &config_files {
            log::debug!("Applying config file {}", path.display());
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => log::warn!("failed to parse {}: {e}", path.display()),
                },
                Err(e) => log::warn!("failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.indent_unit, 4);
        assert_eq!(config.output_indent, 2);
        assert_eq!(config.extensions, vec!["h", "cpp"]);
    }

    #[test]
    fn test_indent_params_match_config() {
        let config = Config {
            tab_width: 8,
            indent_unit: 4,
            output_indent: 3,
            ..Config::default()
        };
        let params = config.indent_params().unwrap();
        assert_eq!(params.tab_width(), 8);
        assert_eq!(params.indent_unit(), 4);
        assert_eq!(params.output_indent(), 3);
    }

    #[test]
    fn test_default_indent_params() {
        assert_eq!(Config::default().indent_params().unwrap(), IndentParams::default());
    }

    #[test]
    fn test_zero_width_rejected_by_indent_params() {
        let config = Config {
            indent_unit: 0,
            ..Config::default()
        };
        assert!(config.validate().is_some());
        let err = config.indent_params().unwrap_err();
        assert!(err.to_string().contains("indent_unit must be at least 1"));
    }

    #[test]
    fn test_config_apply_partial() {
        let mut config = Config::default();
        let partial: PartialConfig = toml::from_str("tab_width = 8\noutput_indent = 4\n").unwrap();
        config.apply_partial(&partial);
        assert_eq!(config.tab_width, 8);
        assert_eq!(config.output_indent, 4);
    }

    #[test]
    fn test_config_apply_partial_preserves_unset() {
        let mut config = Config {
            indent_unit: 8,
            ..Config::default()
        };
        let partial: PartialConfig = toml::from_str("tab_width = 2").unwrap();
        config.apply_partial(&partial);
        assert_eq!(config.tab_width, 2);
        assert_eq!(config.indent_unit, 8);
        assert_eq!(config.extensions, vec!["h", "cpp"]);
    }

    #[test]
    fn test_config_apply_partial_extensions_replace() {
        let mut config = Config::default();
        let partial: PartialConfig = toml::from_str(r#"extensions = ["c", "cc"]"#).unwrap();
        config.apply_partial(&partial);
        assert_eq!(config.extensions, vec!["c", "cc"]);
    }

    #[test]
    fn test_full_config_deserializes_with_defaults() {
        let config: Config = toml::from_str("indent_unit = 2").unwrap();
        assert_eq!(config.indent_unit, 2);
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.output_indent, 2);
    }

    #[test]
    fn test_discover_config_files_nonexistent_path() {
        // Should not panic
        let files = Config::discover_config_files(Path::new("/nonexistent/path/file.cpp"));
        let _ = files.len();
    }

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_none());
    }

    #[test]
    fn test_validate_zero_width() {
        let config = Config {
            indent_unit: 0,
            ..Config::default()
        };
        let error = config.validate().unwrap();
        assert!(error.contains("indent_unit must be at least 1"));
    }

    #[test]
    fn test_validate_width_too_large() {
        let config = Config {
            tab_width: 17,
            ..Config::default()
        };
        let error = config.validate().unwrap();
        assert!(error.contains("tab_width 17 exceeds maximum of 16"));
    }

    #[test]
    fn test_validate_empty_extension() {
        let config = Config {
            extensions: vec![".".to_string()],
            ..Config::default()
        };
        assert!(config.validate().is_some());
    }
}
