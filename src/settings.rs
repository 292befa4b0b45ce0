//! Code for loading program settings.
use crate::get_event_history_config_dir;
use crate::input::read_toml;
use crate::log::DEFAULT_LOG_LEVEL;
use crate::plot::{DEFAULT_FIXED_Y_AXIS_RANGE, YAxisBounds};
use anyhow::{Result, ensure};
use documented::DocumentedFields;
use serde::{Deserialize, Serialize};
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};
use std::fmt::Write;
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.toml";

const DEFAULT_SETTINGS_FILE_HEADER: &str =
    "# This file contains the program settings for event_history\n";

/// Default log level for program
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_plot_width() -> u32 {
    1024
}

fn default_plot_height() -> u32 {
    768
}

fn default_y_axis_min() -> f64 {
    DEFAULT_FIXED_Y_AXIS_RANGE.0
}

fn default_y_axis_max() -> f64 {
    DEFAULT_FIXED_Y_AXIS_RANGE.1
}

/// Get the path to where the settings file will be read from
pub fn get_settings_file_path() -> PathBuf {
    let mut path = get_event_history_config_dir();
    path.push(SETTINGS_FILE_NAME);

    path
}

/// How the bounds of the customer axis are chosen
#[derive(
    Debug, Clone, Copy, Default, PartialEq, SerializeLabeledStringEnum, DeserializeLabeledStringEnum,
)]
pub enum YAxisBoundsMode {
    /// Pad the range of customers by half a customer on each side
    #[default]
    #[string = "padded"]
    Padded,
    /// Use `y_axis_min` and `y_axis_max`
    #[string = "fixed"]
    Fixed,
}

/// Program settings from config file
#[derive(Debug, DocumentedFields, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// The default program log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Whether to overwrite output files by default
    #[serde(default)]
    pub overwrite: bool,
    /// Width of plots in pixels
    #[serde(default = "default_plot_width")]
    pub plot_width: u32,
    /// Height of plots in pixels
    #[serde(default = "default_plot_height")]
    pub plot_height: u32,
    /// How the bounds of the customer axis are chosen ("padded" or "fixed")
    #[serde(default)]
    pub y_axis_bounds: YAxisBoundsMode,
    /// Lower bound of the customer axis when using fixed bounds
    #[serde(default = "default_y_axis_min")]
    pub y_axis_min: f64,
    /// Upper bound of the customer axis when using fixed bounds
    #[serde(default = "default_y_axis_max")]
    pub y_axis_max: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            overwrite: false,
            plot_width: default_plot_width(),
            plot_height: default_plot_height(),
            y_axis_bounds: YAxisBoundsMode::default(),
            y_axis_min: default_y_axis_min(),
            y_axis_max: default_y_axis_max(),
        }
    }
}

impl Settings {
    /// Read the contents of the program settings file.
    ///
    /// If the file is not present, default values for settings will be used
    ///
    /// # Returns
    ///
    /// The program settings as a `Settings` struct or an error if the file is invalid
    pub fn load() -> Result<Settings> {
        Self::load_from_path(&get_settings_file_path())
    }

    /// Read from the specified path, falling back to defaults if the file doesn't exist
    pub fn load_from_path(file_path: &Path) -> Result<Settings> {
        if !file_path.is_file() {
            return Ok(Settings::default());
        }

        let settings: Settings = read_toml(file_path)?;
        settings.validate()?;

        Ok(settings)
    }

    /// Check that the settings are usable
    fn validate(&self) -> Result<()> {
        ensure!(
            self.plot_width > 0 && self.plot_height > 0,
            "Plot dimensions must be greater than zero"
        );
        ensure!(
            self.y_axis_min < self.y_axis_max,
            "y_axis_min must be less than y_axis_max"
        );

        Ok(())
    }

    /// The plot size as (width, height)
    pub fn plot_size(&self) -> (u32, u32) {
        (self.plot_width, self.plot_height)
    }

    /// The y-axis bounds to use for plots
    pub fn y_axis_bounds(&self) -> YAxisBounds {
        match self.y_axis_bounds {
            YAxisBoundsMode::Padded => YAxisBounds::Padded,
            YAxisBoundsMode::Fixed => YAxisBounds::Fixed {
                min: self.y_axis_min,
                max: self.y_axis_max,
            },
        }
    }

    /// The contents of the default settings file
    pub fn default_file_contents() -> String {
        // Convert default settings to TOML
        let settings_raw =
            toml::to_string(&Settings::default()).expect("Could not convert settings to TOML");

        // Iterate through the generated TOML, commenting out lines and adding docs
        let mut out = DEFAULT_SETTINGS_FILE_HEADER.to_string();
        for line in settings_raw.split('\n') {
            if let Some(last) = line.find('=') {
                // Add documentation from doc comments
                let field = line[..last].trim();

                // Use doc comment to document parameter. All fields should have doc comments.
                let docs = Settings::get_field_docs(field).expect("Missing doc comment for field");
                for line in docs.split('\n') {
                    write!(&mut out, "\n# # {}\n", line.trim()).unwrap();
                }

                writeln!(&mut out, "# {}", line.trim()).unwrap();
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_settings_load_from_path_no_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(SETTINGS_FILE_NAME); // NB: doesn't exist
        assert_eq!(
            Settings::load_from_path(&file_path).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn test_settings_load_from_path() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(SETTINGS_FILE_NAME);

        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "log_level = \"warn\"\ny_axis_bounds = \"fixed\"").unwrap();
        }

        let settings = Settings::load_from_path(&file_path).unwrap();
        assert_eq!(
            settings,
            Settings {
                log_level: "warn".to_string(),
                y_axis_bounds: YAxisBoundsMode::Fixed,
                ..Settings::default()
            }
        );
        assert_eq!(settings.y_axis_bounds(), YAxisBounds::fixed_default());
    }

    #[test]
    fn test_settings_load_from_path_invalid() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(SETTINGS_FILE_NAME);

        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "y_axis_min = 5.0\ny_axis_max = 1.0").unwrap();
        }

        assert_error!(
            Settings::load_from_path(&file_path),
            "y_axis_min must be less than y_axis_max"
        );
    }

    #[test]
    fn test_settings_default_y_axis_bounds() {
        assert_eq!(Settings::default().y_axis_bounds(), YAxisBounds::Padded);
    }

    #[test]
    fn test_default_file_contents() {
        let contents = Settings::default_file_contents();
        assert!(contents.starts_with(DEFAULT_SETTINGS_FILE_HEADER));
        assert!(contents.contains("# log_level = \"info\""));
        assert!(contents.contains("# y_axis_bounds = \"padded\""));
    }
}
