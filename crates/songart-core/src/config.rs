//! Canvas layout configuration.

use serde::{Deserialize, Serialize};

use crate::error::ArtError;

/// Per-channel multipliers applied to a cell's intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelWeights {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ChannelWeights {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Red/green heat mapping with no blue.
    pub const fn heat() -> Self {
        Self::new(1.0, 1.0, 0.0)
    }

    pub const fn grayscale() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    fn as_array(&self) -> [(&'static str, f64); 3] {
        [("r", self.r), ("g", self.g), ("b", self.b)]
    }
}

impl Default for ChannelWeights {
    fn default() -> Self {
        Self::heat()
    }
}

/// Layout options for mapping a grid onto a square canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Output pixels per logical cell along each axis.
    pub pixel_scale: u32,
    /// Color channel weights.
    pub channel_weights: ChannelWeights,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pixel_scale: 1,
            channel_weights: ChannelWeights::default(),
        }
    }
}

impl LayoutConfig {
    pub fn with_pixel_scale(mut self, pixel_scale: u32) -> Self {
        self.pixel_scale = pixel_scale;
        self
    }

    pub fn with_channel_weights(mut self, weights: ChannelWeights) -> Self {
        self.channel_weights = weights;
        self
    }

    /// Check that the scale is positive and every weight is finite and non-negative.
    pub fn validate(&self) -> Result<(), ArtError> {
        if self.pixel_scale == 0 {
            return Err(ArtError::InvalidConfig(
                "pixel_scale must be at least 1, got 0".to_string(),
            ));
        }
        for (name, weight) in self.channel_weights.as_array() {
            if !weight.is_finite() {
                return Err(ArtError::InvalidConfig(format!(
                    "channel_weights.{} must be finite, got {}",
                    name, weight
                )));
            }
            if weight < 0.0 {
                return Err(ArtError::InvalidConfig(format!(
                    "channel_weights.{} must be non-negative, got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }
}
