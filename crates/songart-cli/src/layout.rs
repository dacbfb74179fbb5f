//! Layout resolution: defaults, then a JSON layout file, then CLI flags.

use anyhow::{bail, Context, Result};
use songart_core::{ChannelWeights, LayoutConfig};
use std::fs;

/// Layout-related command-line options.
#[derive(Debug, Clone, Default)]
pub struct LayoutArgs {
    /// Path to a JSON layout file.
    pub config: Option<String>,
    /// Overrides `pixel_scale`.
    pub pixel_scale: Option<u32>,
    /// Overrides `channel_weights`, as `R,G,B`.
    pub weights: Option<String>,
}

/// Build the effective layout.
///
/// Validation of the values themselves happens when the grid is mapped, so
/// a zero scale here is reported with the same error as any other source.
pub fn resolve_layout(args: &LayoutArgs) -> Result<LayoutConfig> {
    let mut layout = match &args.config {
        Some(path) => load_layout_file(path)?,
        None => LayoutConfig::default(),
    };

    if let Some(scale) = args.pixel_scale {
        layout.pixel_scale = scale;
    }
    if let Some(weights) = &args.weights {
        layout.channel_weights = parse_weights(weights)?;
    }

    Ok(layout)
}

/// Read a JSON layout file.
pub fn load_layout_file(path: &str) -> Result<LayoutConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read layout file: {}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse layout file: {}", path))
}

/// Parse `R,G,B` channel weights.
pub fn parse_weights(value: &str) -> Result<ChannelWeights> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        bail!("weights must be three comma-separated numbers (R,G,B), got '{}'", value);
    }

    let mut channels = [0.0f64; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .with_context(|| format!("invalid weight '{}' in '{}'", part, value))?;
    }

    Ok(ChannelWeights::new(channels[0], channels[1], channels[2]))
}
