use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::decorate::DisplayOptions;
use crate::export::OutputFormat;
use crate::state::SessionOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub columns: ColumnsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_false")]
    pub shuffle: bool,
    /// Fixed shuffle seed for reproducible ordering.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_true")]
    pub include_back: bool,
    #[serde(default = "default_true")]
    pub include_skip: bool,
    #[serde(default = "default_true")]
    pub stop_at_last_example: bool,
    #[serde(default = "default_true")]
    pub reset_buttons_after_click: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnsConfig {
    #[serde(default = "default_example_column")]
    pub example: String,
    #[serde(default = "default_value_column")]
    pub value: String,
    #[serde(default = "default_id_column")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_false")]
    pub bionic_reading: bool,
    #[serde(default = "default_bionic_min_word_length")]
    pub bionic_min_word_length: usize,
    #[serde(default = "default_bionic_first_characters")]
    pub bionic_first_characters: usize,
    #[serde(default = "default_false")]
    pub checkerboard: bool,
    #[serde(default = "default_checkerboard_colors")]
    pub checkerboard_colors: [String; 2],
    #[serde(default = "default_buttons_in_a_row")]
    pub buttons_in_a_row: usize,
    /// Single-label options in a drop-down list instead of buttons.
    #[serde(default = "default_false")]
    pub use_dropdown: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub recent_datasets: Vec<String>,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_example_column() -> String {
    "example".to_string()
}

fn default_value_column() -> String {
    "label".to_string()
}

fn default_id_column() -> String {
    "id".to_string()
}

fn default_bionic_min_word_length() -> usize {
    6
}

fn default_bionic_first_characters() -> usize {
    2
}

fn default_checkerboard_colors() -> [String; 2] {
    ["#e1e3e1".to_string(), "#bab8b8".to_string()]
}

fn default_buttons_in_a_row() -> usize {
    4
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            shuffle: false,
            seed: None,
            include_back: true,
            include_skip: true,
            stop_at_last_example: true,
            reset_buttons_after_click: true,
        }
    }
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            example: default_example_column(),
            value: default_value_column(),
            id: default_id_column(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bionic_reading: false,
            bionic_min_word_length: default_bionic_min_word_length(),
            bionic_first_characters: default_bionic_first_characters(),
            checkerboard: false,
            checkerboard_colors: default_checkerboard_colors(),
            buttons_in_a_row: default_buttons_in_a_row(),
            use_dropdown: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            recent_datasets: Vec::new(),
        }
    }
}

impl SessionConfig {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            shuffle: self.shuffle,
            allow_back: self.include_back,
            allow_skip: self.include_skip,
            reset_multi_label_on_submit: self.reset_buttons_after_click,
            stop_at_last_example: self.stop_at_last_example,
            use_dropdown: false,
        }
    }
}

impl AppConfig {
    /// Session switches, including the ones kept in `[display]`.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            use_dropdown: self.display.use_dropdown,
            ..self.session.session_options()
        }
    }
}

impl DisplayConfig {
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            bionic_reading: self.bionic_reading,
            bionic_min_word_length: self.bionic_min_word_length,
            bionic_first_characters: self.bionic_first_characters,
            checkerboard: self.checkerboard,
            checkerboard_colors: self.checkerboard_colors.clone(),
        }
    }
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "annotate")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration from `path` (or the default location), falling back to
/// defaults when the file is missing or invalid.
pub fn load_config(path: Option<&Path>) -> AppConfig {
    let Some(path) = path.map(Path::to_path_buf).or_else(config_path) else {
        tracing::warn!("No config directory available. Using defaults.");
        return AppConfig::default();
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to parse config file: {e}. Using defaults.");
                AppConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), "Failed to read config file: {e}. Using defaults.");
            AppConfig::default()
        }
    }
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }

    let toml = toml::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(path, toml).map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

/// Add a dataset path to recent datasets list
pub fn add_recent_dataset(config: &mut AppConfig, path: String) {
    config.output.recent_datasets.retain(|p| p != &path);
    config.output.recent_datasets.insert(0, path);
    config.output.recent_datasets.truncate(10);
}
