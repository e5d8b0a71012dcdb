//! Run configuration (TOML).
//!
//! Every section is optional in the file; defaults mirror the original
//! report layout (`data/raw`, `output/plots`, 7-day window, top 10).

use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Full run configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub data: DataSection,
    pub output: OutputSection,
    pub transform: TransformSection,
    pub theme: ThemeSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataSection {
    /// Directory holding the raw snapshots.
    pub raw_dir: PathBuf,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSection {
    /// Directory the chart artifacts are written to.
    pub plots_dir: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            plots_dir: PathBuf::from("output/plots"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransformSection {
    /// Trailing-mean window, in days.
    pub ma_window: usize,
    /// Ranking size for the top-countries charts.
    pub top_n: usize,
}

impl Default for TransformSection {
    fn default() -> Self {
        Self {
            ma_window: 7,
            top_n: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThemeSection {
    /// Optional palette override as RGB triples.
    pub palette: Option<Vec<[u8; 3]>>,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.transform.ma_window == 0 {
            return Err(ConfigError::Invalid(
                "transform.ma_window must be >= 1".into(),
            ));
        }
        if self.transform.top_n == 0 {
            return Err(ConfigError::Invalid("transform.top_n must be >= 1".into()));
        }
        Ok(())
    }

    /// Build the chart theme, applying any palette override.
    pub fn chart_theme(&self) -> Theme {
        match &self.theme.palette {
            Some(palette) if !palette.is_empty() => {
                Theme::from_palette(palette.iter().map(|c| (c[0], c[1], c[2])).collect())
            }
            _ => Theme::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_layout() {
        let config = RunConfig::default();
        assert_eq!(config.data.raw_dir, PathBuf::from("data/raw"));
        assert_eq!(config.output.plots_dir, PathBuf::from("output/plots"));
        assert_eq!(config.transform.ma_window, 7);
        assert_eq!(config.transform.top_n, 10);
        assert!(config.theme.palette.is_none());
    }

    #[test]
    fn empty_toml_is_the_default_config() {
        let config = RunConfig::from_toml("").unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn sections_parse_and_override_defaults() {
        let config = RunConfig::from_toml(
            r#"
[data]
raw_dir = "snapshots"

[transform]
ma_window = 14

[theme]
palette = [[10, 20, 30], [40, 50, 60]]
"#,
        )
        .unwrap();

        assert_eq!(config.data.raw_dir, PathBuf::from("snapshots"));
        assert_eq!(config.transform.ma_window, 14);
        assert_eq!(config.transform.top_n, 10);
        assert_eq!(config.chart_theme().palette_len(), 2);
    }

    #[test]
    fn zero_window_is_rejected() {
        let err = RunConfig::from_toml("[transform]\nma_window = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
