//! Pager configuration: the host-facing props, loadable from a TOML profile.

use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const DEFAULT_THRESHOLD: f64 = 5.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse profile: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid profile: {0}")]
    Invalid(String),
}

/// Explicit container sizing. Any value set disables height animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerSize {
    pub height: Option<f64>,
    pub max_height: Option<f64>,
    pub min_height: Option<f64>,
}

impl ContainerSize {
    pub fn is_fixed(&self) -> bool {
        self.height.is_some() || self.max_height.is_some() || self.min_height.is_some()
    }
}

/// Which signal family a native scroll container delivers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NativeIdiom {
    /// Continuous content offset plus a momentum-end offset.
    #[default]
    Offset,
    /// Page-scroll progress plus a discrete page-selected position.
    PageSelected,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NativeConfig {
    pub idiom: NativeIdiom,
    /// Width assumed before the first layout signal.
    pub view_extent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagerConfig {
    /// Controlled index; a changed value overrides any gesture in progress.
    pub index: usize,
    /// Elastic over-drag past the first and last panel.
    pub resistance: bool,
    /// Ignore all gestures.
    pub disabled: bool,
    /// Release speed above which a swipe commits in its direction.
    pub threshold: f64,
    pub container: ContainerSize,
    pub native: NativeConfig,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            index: 0,
            resistance: false,
            disabled: false,
            threshold: DEFAULT_THRESHOLD,
            container: ContainerSize::default(),
            native: NativeConfig::default(),
        }
    }
}

impl PagerConfig {
    pub fn default_profile_text() -> &'static str {
        include_str!("../profiles/default.toml")
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: PagerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!("loaded pager profile from {}", path.display());
        Ok(config)
    }

    /// Height animation only runs when nothing pins the container size.
    pub fn height_sync(&self) -> bool {
        !self.container.is_fixed()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "threshold must be a non-negative number, got {}",
                self.threshold
            )));
        }

        let sizes = [
            ("container.height", self.container.height),
            ("container.max_height", self.container.max_height),
            ("container.min_height", self.container.min_height),
        ];
        for (key, value) in sizes {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(ConfigError::Invalid(format!(
                        "{key} must be a positive number of pixels, got {v}"
                    )));
                }
            }
        }

        let extent = self.native.view_extent;
        if !extent.is_finite() || extent < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "native.view_extent must be >= 0, got {extent}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_profile_matches_defaults() {
        let config = PagerConfig::from_toml_str(PagerConfig::default_profile_text()).unwrap();
        assert_eq!(config, PagerConfig::default());
        assert!(config.height_sync());
    }

    #[test]
    fn empty_profile_uses_defaults() {
        let config = PagerConfig::from_toml_str("").unwrap();
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert!(!config.resistance);
    }

    #[test]
    fn explicit_height_disables_sync() {
        let config = PagerConfig::from_toml_str("[container]\nmin_height = 100.0\n").unwrap();
        assert!(!config.height_sync());
    }

    #[test]
    fn page_selected_idiom_parses() {
        let config = PagerConfig::from_toml_str(
            "resistance = true\n[native]\nidiom = \"page-selected\"\nview_extent = 360.0\n",
        )
        .unwrap();
        assert_eq!(config.native.idiom, NativeIdiom::PageSelected);
        assert_eq!(config.native.view_extent, 360.0);
        assert!(config.resistance);
    }

    #[test]
    fn rejects_negative_threshold() {
        let err = PagerConfig::from_toml_str("threshold = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_height() {
        let err = PagerConfig::from_toml_str("[container]\nheight = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("container.height"));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = PagerConfig::from_toml_str("treshold = 3.0").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = PagerConfig::load("/nonexistent/swipeviews.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/swipeviews.toml"));
    }
}
