use serde::{Deserialize, Serialize};

use crate::bounce::PhysicsConfig;
use crate::error::ConfigError;

/// Default width of the decorative cat image in CSS pixels.
pub const CAT_WIDTH: f64 = 180.0;
/// Ball diameter at the top of the page.
pub const BALL_START: f64 = 64.0;
/// Ball diameter at the bottom of the page.
pub const BALL_END: f64 = 28.0;
/// Rope stroke and vector ball fill.
pub const BALL_COLOR: &str = "#b45f41";
/// Distance from the top of the viewport, clears a sticky header.
pub const TOP_OFFSET: f64 = 96.0;
/// Distance from the right edge of the viewport.
pub const RIGHT_OFFSET: f64 = 16.0;

/// Viewport width below which the overlay is hidden entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HideBelow {
    Md,
    #[default]
    Lg,
    Xl,
    /// Always visible.
    #[serde(rename = "none")]
    Never,
}

impl HideBelow {
    /// Minimum viewport width in CSS pixels, using the Tailwind breakpoints.
    pub fn min_width(self) -> Option<f64> {
        match self {
            Self::Md => Some(768.0),
            Self::Lg => Some(1024.0),
            Self::Xl => Some(1280.0),
            Self::Never => None,
        }
    }

    pub fn is_visible(self, viewport_width: f64) -> bool {
        match self.min_width() {
            Some(min) => viewport_width >= min,
            None => true,
        }
    }
}

/// Host-supplied configuration for one overlay instance.
///
/// Keys are accepted in snake_case (TOML files) and camelCase (the JS object
/// the host page passes to `mount`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatYarnConfig {
    /// URL of the static top-right image.
    #[serde(alias = "catSrc")]
    pub cat_src: String,
    #[serde(alias = "catWidth")]
    pub cat_width: f64,
    #[serde(alias = "ballStart")]
    pub ball_start: f64,
    #[serde(alias = "ballEnd")]
    pub ball_end: f64,
    pub color: String,
    #[serde(alias = "topOffset")]
    pub top_offset: f64,
    #[serde(alias = "rightOffset")]
    pub right_offset: f64,
    #[serde(alias = "hideBelow")]
    pub hide_below: HideBelow,
    /// Replaces the vector ball when it loads; a failed load falls back to
    /// the vector ball.
    #[serde(alias = "ballImageSrc")]
    pub ball_image_src: Option<String>,
    pub physics: PhysicsConfig,
}

impl Default for CatYarnConfig {
    fn default() -> Self {
        Self {
            cat_src: String::new(),
            cat_width: CAT_WIDTH,
            ball_start: BALL_START,
            ball_end: BALL_END,
            color: BALL_COLOR.to_string(),
            top_offset: TOP_OFFSET,
            right_offset: RIGHT_OFFSET,
            hide_below: HideBelow::default(),
            ball_image_src: None,
            physics: PhysicsConfig::default(),
        }
    }
}

impl CatYarnConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is
    /// missing, unparseable or invalid.
    pub fn load() -> Self {
        let path = std::env::var("CATYARN_CONFIG")
            .unwrap_or_else(|_| "config/catyarn.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to load {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would break the geometry or keep the bounce from
    /// settling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cat_width > 0.0) || !self.cat_width.is_finite() {
            return Err(ConfigError::Invalid(
                "cat_width must be finite and > 0".to_string(),
            ));
        }
        let balls = [self.ball_start, self.ball_end];
        if balls.iter().any(|d| !(*d > 0.0) || !d.is_finite()) {
            return Err(ConfigError::Invalid(
                "ball_start and ball_end must be finite and > 0".to_string(),
            ));
        }
        if !self.top_offset.is_finite() || !self.right_offset.is_finite() {
            return Err(ConfigError::Invalid(
                "top_offset and right_offset must be finite".to_string(),
            ));
        }
        if self.color.trim().is_empty() {
            return Err(ConfigError::Invalid("color must not be empty".to_string()));
        }
        self.physics.validate()
    }

    /// Non-empty ball image URL, if any.
    pub fn ball_image(&self) -> Option<&str> {
        self.ball_image_src
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
