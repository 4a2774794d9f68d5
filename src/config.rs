//! Column mode configuration
//!
//! Stored in `~/.config/csvcolumns/config.yaml`. Every field has a default;
//! a partial file only overrides what it names. Values that fail validation
//! are reported and replaced by their default instead of rejecting the
//! whole file.

use serde::{Deserialize, Serialize};

use crate::csv::{parse_separator, AutoDetectThresholds, DetectLimits, SamplingMode};

/// How palette colors are applied to columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Foreground,
    Background,
}

/// Auto-enable heuristic for buffers not named as delimited files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoDetectConfig {
    pub enabled: bool,
    pub sample_lines: usize,
    pub min_lines: usize,
    pub min_columns: usize,
    pub min_agreement: f32,
}

impl Default for AutoDetectConfig {
    fn default() -> Self {
        let thresholds = AutoDetectThresholds::default();
        Self {
            enabled: false,
            sample_lines: thresholds.sample_lines,
            min_lines: thresholds.min_lines,
            min_columns: thresholds.min_columns,
            min_agreement: thresholds.min_agreement,
        }
    }
}

impl AutoDetectConfig {
    pub fn thresholds(&self) -> AutoDetectThresholds {
        AutoDetectThresholds {
            sample_lines: self.sample_lines,
            min_lines: self.min_lines,
            min_columns: self.min_columns,
            min_agreement: self.min_agreement,
        }
    }
}

/// Column mode configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    /// Column colors as `#rrggbb`, cycled by column index
    pub palette: Vec<String>,
    pub color_mode: ColorMode,
    /// Soft cap on fields processed per line
    pub max_columns: usize,
    /// Sticky header lines for new buffers
    pub header_lines: usize,
    /// Whether new buffers show the sticky header
    pub sticky_header: bool,
    pub width_sampling: SamplingMode,
    /// Candidate separators for detection, in priority order
    pub separators: Vec<String>,
    /// Non-blank lines sampled by separator detection
    pub detect_lines: usize,
    /// Total lines scanned by separator detection
    pub detect_scan_limit: usize,
    /// Filetypes always treated as delimited
    pub filetypes: Vec<String>,
    pub auto_detect: AutoDetectConfig,
}

fn default_palette() -> Vec<String> {
    [
        "#e06c75", "#98c379", "#e5c07b", "#61afef", "#c678dd", "#56b6c2", "#d19a66", "#be5046",
        "#7ec699", "#abb2bf",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_separators() -> Vec<String> {
    [",", "\t", ";", "|"].iter().map(|s| s.to_string()).collect()
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            color_mode: ColorMode::default(),
            max_columns: 100,
            header_lines: 1,
            sticky_header: true,
            width_sampling: SamplingMode::default(),
            separators: default_separators(),
            detect_lines: 10,
            detect_scan_limit: 100,
            filetypes: vec!["csv".into(), "tsv".into(), "psv".into()],
            auto_detect: AutoDetectConfig::default(),
        }
    }
}

/// Partial configuration applied over a base config
///
/// Only the fields that are `Some` replace the base values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub palette: Option<Vec<String>>,
    pub color_mode: Option<ColorMode>,
    pub max_columns: Option<usize>,
    pub header_lines: Option<usize>,
    pub sticky_header: Option<bool>,
    pub width_sampling: Option<SamplingMode>,
    pub separators: Option<Vec<String>>,
    pub detect_lines: Option<usize>,
    pub detect_scan_limit: Option<usize>,
    pub filetypes: Option<Vec<String>>,
    pub auto_detect: Option<bool>,
}

impl ColumnsConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<ColumnsConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.validated()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Apply overrides on top of this config
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(palette) = overrides.palette {
            self.palette = palette;
        }
        if let Some(mode) = overrides.color_mode {
            self.color_mode = mode;
        }
        if let Some(max) = overrides.max_columns {
            self.max_columns = max;
        }
        if let Some(lines) = overrides.header_lines {
            self.header_lines = lines;
        }
        if let Some(sticky) = overrides.sticky_header {
            self.sticky_header = sticky;
        }
        if let Some(mode) = overrides.width_sampling {
            self.width_sampling = mode;
        }
        if let Some(separators) = overrides.separators {
            self.separators = separators;
        }
        if let Some(lines) = overrides.detect_lines {
            self.detect_lines = lines;
        }
        if let Some(limit) = overrides.detect_scan_limit {
            self.detect_scan_limit = limit;
        }
        if let Some(filetypes) = overrides.filetypes {
            self.filetypes = filetypes;
        }
        if let Some(enabled) = overrides.auto_detect {
            self.auto_detect.enabled = enabled;
        }
        self.validated()
    }

    /// Replace invalid fields by their defaults, warning about each one
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if self.palette.is_empty() || self.palette.iter().any(|c| parse_hex_color(c).is_none()) {
            tracing::warn!("Invalid palette {:?}, using default", self.palette);
            self.palette = defaults.palette;
        }
        if self.max_columns == 0 {
            tracing::warn!("max_columns must be at least 1, using {}", defaults.max_columns);
            self.max_columns = defaults.max_columns;
        }
        if self.separators.is_empty()
            || self.separators.iter().any(|s| parse_separator(s).is_none())
        {
            tracing::warn!("Invalid separators {:?}, using default", self.separators);
            self.separators = defaults.separators;
        }
        if self.detect_lines == 0 {
            tracing::warn!("detect_lines must be at least 1, using {}", defaults.detect_lines);
            self.detect_lines = defaults.detect_lines;
        }
        if !(0.0..=1.0).contains(&self.auto_detect.min_agreement) {
            tracing::warn!(
                "auto_detect.min_agreement {} outside 0..=1, using {}",
                self.auto_detect.min_agreement,
                defaults.auto_detect.min_agreement
            );
            self.auto_detect.min_agreement = defaults.auto_detect.min_agreement;
        }
        self
    }

    /// Candidate separators as characters
    pub fn separator_chars(&self) -> Vec<char> {
        self.separators
            .iter()
            .filter_map(|s| parse_separator(s))
            .collect()
    }

    pub fn detect_limits(&self) -> DetectLimits {
        DetectLimits {
            non_empty_lines: self.detect_lines,
            scan_budget: self.detect_scan_limit,
        }
    }

    pub fn palette_size(&self) -> usize {
        self.palette.len().max(1)
    }

    /// Whether a filetype is always treated as delimited
    pub fn is_delimited_filetype(&self, filetype: &str) -> bool {
        !filetype.is_empty()
            && self
                .filetypes
                .iter()
                .any(|ft| ft.eq_ignore_ascii_case(filetype))
    }
}

/// Parse a `#rrggbb` color into its components
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ColumnsConfig::default();
        assert_eq!(config.palette.len(), 10);
        assert_eq!(config.header_lines, 1);
        assert_eq!(config.max_columns, 100);
        assert_eq!(config.separator_chars(), vec![',', '\t', ';', '|']);
        assert!(!config.auto_detect.enabled);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: ColumnsConfig =
            serde_yaml::from_str("header_lines: 3\ncolor_mode: background\n").unwrap();
        assert_eq!(config.header_lines, 3);
        assert_eq!(config.color_mode, ColorMode::Background);
        assert_eq!(config.max_columns, 100);
        assert_eq!(config.width_sampling, SamplingMode::Full);
    }

    #[test]
    fn test_apply_overrides() {
        let config = ColumnsConfig::default().apply(ConfigOverrides {
            header_lines: Some(0),
            width_sampling: Some(SamplingMode::Windowed),
            auto_detect: Some(true),
            ..Default::default()
        });
        assert_eq!(config.header_lines, 0);
        assert_eq!(config.width_sampling, SamplingMode::Windowed);
        assert!(config.auto_detect.enabled);
        assert_eq!(config.palette, ColumnsConfig::default().palette);
    }

    #[test]
    fn test_validation_replaces_bad_fields() {
        let config = ColumnsConfig::default().apply(ConfigOverrides {
            palette: Some(vec![]),
            max_columns: Some(0),
            separators: Some(vec![",,".into()]),
            header_lines: Some(2),
            ..Default::default()
        });
        let defaults = ColumnsConfig::default();
        assert_eq!(config.palette, defaults.palette);
        assert_eq!(config.max_columns, defaults.max_columns);
        assert_eq!(config.separators, defaults.separators);
        assert_eq!(config.header_lines, 2);
    }

    #[test]
    fn test_separator_names_in_config() {
        let config = ColumnsConfig::default().apply(ConfigOverrides {
            separators: Some(vec!["tab".into(), "|".into()]),
            ..Default::default()
        });
        assert_eq!(config.separator_chars(), vec!['\t', '|']);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000"), Some((255, 128, 0)));
        assert_eq!(parse_hex_color("ff8000"), None);
        assert_eq!(parse_hex_color("#ff80"), None);
        assert_eq!(parse_hex_color("#gg8000"), None);
    }

    #[test]
    fn test_delimited_filetype() {
        let config = ColumnsConfig::default();
        assert!(config.is_delimited_filetype("CSV"));
        assert!(!config.is_delimited_filetype("rust"));
        assert!(!config.is_delimited_filetype(""));
    }
}
