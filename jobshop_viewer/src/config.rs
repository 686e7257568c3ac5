//! Viewer configuration file support.
//!
//! Layout constants (column width, row header width, shift duration) and the
//! terminal geometry are read from a TOML file. Every key is optional:
//!
//! ```toml
//! [layout]
//! column_width = 100.0
//! row_header_width = 200.0
//! shift_duration_ms = 28800000
//!
//! [terminal]
//! width = 1200.0
//! px_per_cell = 10.0
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

/// Name of the configuration file searched for by [`ViewerConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "jobshop-viewer.toml";

/// Largest accepted `terminal.width`, in pixels.
pub const MAX_VIEW_WIDTH: f64 = 100_000.0;

/// Viewer configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub terminal: TerminalSettings,
}

/// Timeline geometry settings, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Width of one shift column.
    #[serde(default = "default_column_width")]
    pub column_width: f64,
    /// Width of the row header column left of the first shift.
    #[serde(default = "default_row_header_width")]
    pub row_header_width: f64,
    #[serde(default = "default_row_height")]
    pub row_height: f64,
    /// Nominal shift length used to convert time spans to columns.
    #[serde(default = "default_shift_duration_ms")]
    pub shift_duration_ms: i64,
    /// Shifts with a value below this are flagged as underutilized.
    #[serde(default = "default_underutilized_epsilon")]
    pub underutilized_epsilon: f64,
    /// A bar label is elided when it needs more than this share of the bar width.
    #[serde(default = "default_label_fill_ratio")]
    pub label_fill_ratio: f64,
}

/// Terminal renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalSettings {
    /// Width reported as the available view width, in pixels.
    #[serde(default = "default_terminal_width")]
    pub width: f64,
    /// Pixels covered by one character cell.
    #[serde(default = "default_px_per_cell")]
    pub px_per_cell: f64,
}

fn default_column_width() -> f64 {
    100.0
}

fn default_row_header_width() -> f64 {
    200.0
}

fn default_row_height() -> f64 {
    100.0
}

fn default_shift_duration_ms() -> i64 {
    28_800_000
}

fn default_underutilized_epsilon() -> f64 {
    0.00001
}

fn default_label_fill_ratio() -> f64 {
    0.8
}

fn default_terminal_width() -> f64 {
    1200.0
}

fn default_px_per_cell() -> f64 {
    10.0
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            column_width: default_column_width(),
            row_header_width: default_row_header_width(),
            row_height: default_row_height(),
            shift_duration_ms: default_shift_duration_ms(),
            underutilized_epsilon: default_underutilized_epsilon(),
            label_fill_ratio: default_label_fill_ratio(),
        }
    }
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            width: default_terminal_width(),
            px_per_cell: default_px_per_cell(),
        }
    }
}

impl ViewerConfig {
    /// Load and validate configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ViewerConfig)` if the file was read, parsed and validated
    /// * `Err(ConfigError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: ViewerConfig = content.parse()?;
        log::debug!("Loaded viewer configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `jobshop-viewer.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("config").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Check that all geometry values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        let positive = [
            ("layout.column_width", layout.column_width),
            ("layout.row_height", layout.row_height),
            ("terminal.width", self.terminal.width),
            ("terminal.px_per_cell", self.terminal.px_per_cell),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive number, got {}",
                    key, value
                )));
            }
        }

        if self.terminal.width > MAX_VIEW_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "terminal.width must be at most {}, got {}",
                MAX_VIEW_WIDTH, self.terminal.width
            )));
        }

        if !(layout.row_header_width.is_finite() && layout.row_header_width >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "layout.row_header_width must not be negative, got {}",
                layout.row_header_width
            )));
        }
        if layout.shift_duration_ms <= 0 {
            return Err(ConfigError::Invalid(format!(
                "layout.shift_duration_ms must be positive, got {}",
                layout.shift_duration_ms
            )));
        }
        if !(layout.label_fill_ratio > 0.0 && layout.label_fill_ratio <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "layout.label_fill_ratio must be in (0, 1], got {}",
                layout.label_fill_ratio
            )));
        }
        if !(layout.underutilized_epsilon.is_finite() && layout.underutilized_epsilon >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "layout.underutilized_epsilon must not be negative, got {}",
                layout.underutilized_epsilon
            )));
        }

        Ok(())
    }
}

impl FromStr for ViewerConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: ViewerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}
