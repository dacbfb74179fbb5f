//! Square canvas layout.
//!
//! The grid is reshaped into a square of side `isqrt(instruments * ticks)`
//! logical cells. Each canvas row reads one instrument, cycling through the
//! instruments; after every full cycle the tick window slides right by one
//! canvas width. The result is each instrument's timeline laid out as an
//! interleaved band that repeats every `instrument_count` rows.
//!
//! Because the side is a truncated square root, some lookups fall outside
//! the grid. Those cells are black.

use crate::config::{ChannelWeights, LayoutConfig};
use crate::error::ArtError;
use crate::grid::IntensityGrid;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color for an intensity under the given channel weights.
    ///
    /// Each channel is `weight * intensity`, truncated toward zero and
    /// clamped into `[0, 255]`.
    pub fn from_intensity(intensity: u8, weights: &ChannelWeights) -> Self {
        let channel = |weight: f64| (weight * f64::from(intensity)).clamp(0.0, 255.0) as u8;
        Self::new(channel(weights.r), channel(weights.g), channel(weights.b))
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Square RGB pixel buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBuffer {
    side: u32,
    logical_side: u32,
    pixel_scale: u32,
    data: Vec<Rgb>,
}

impl ColorBuffer {
    /// Side length in pixels.
    #[inline]
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Side length in logical cells (before pixel scaling).
    #[inline]
    pub fn logical_side(&self) -> u32 {
        self.logical_side
    }

    #[inline]
    pub fn pixel_scale(&self) -> u32 {
        self.pixel_scale
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    /// If `x` or `y` is not below [`ColorBuffer::side`].
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgb {
        assert!(x < self.side && y < self.side, "pixel ({}, {}) outside canvas", x, y);
        self.data[y as usize * self.side as usize + x as usize]
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Rgb] {
        &self.data
    }

    /// Convert to packed 8-bit RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 3);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_array());
        }
        bytes
    }
}

/// Largest `s` with `s * s <= n`.
pub fn isqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while u128::from(root) * u128::from(root) > u128::from(n) {
        root -= 1;
    }
    while u128::from(root + 1) * u128::from(root + 1) <= u128::from(n) {
        root += 1;
    }
    root
}

/// Logical canvas side for a grid shape.
pub fn logical_side_for(instrument_count: usize, tick_count: usize) -> u64 {
    isqrt(instrument_count as u64 * tick_count as u64)
}

/// Lay an intensity grid out on a square canvas.
///
/// # Returns
/// * `Err(ArtError::InvalidConfig)` if the config fails validation or the
///   scaled canvas would be too large to address
/// * `Err(ArtError::DegenerateInput)` if the grid has no cells
pub fn map(grid: &IntensityGrid, config: &LayoutConfig) -> Result<ColorBuffer, ArtError> {
    config.validate()?;

    let instruments = grid.instrument_count();
    let ticks = grid.tick_count();
    if grid.cell_count() == 0 {
        return Err(ArtError::DegenerateInput { instruments, ticks });
    }

    let logical_side = logical_side_for(instruments, ticks);
    let side = logical_side
        .checked_mul(u64::from(config.pixel_scale))
        .and_then(|s| u32::try_from(s).ok())
        .ok_or_else(|| {
            ArtError::InvalidConfig(format!(
                "pixel_scale {} makes a {}-cell canvas too large",
                config.pixel_scale, logical_side
            ))
        })?;
    let logical_side = logical_side as usize;
    let scale = config.pixel_scale as usize;
    let width = side as usize;

    let too_large = || {
        ArtError::InvalidConfig(format!(
            "pixel_scale {} makes a {}x{} pixel canvas too large to allocate",
            config.pixel_scale, side, side
        ))
    };
    let pixel_count = width.checked_mul(width).ok_or_else(too_large)?;
    let mut data = Vec::new();
    data.try_reserve_exact(pixel_count).map_err(|_| too_large())?;
    data.resize(pixel_count, Rgb::BLACK);
    let mut logical_row = vec![Rgb::BLACK; logical_side];
    let mut instrument_cursor = 0usize;
    let mut column_offset = 0usize;

    for y in 0..logical_side {
        for (x, cell) in logical_row.iter_mut().enumerate() {
            *cell = match grid.get(instrument_cursor, x + column_offset) {
                Some(intensity) => Rgb::from_intensity(intensity, &config.channel_weights),
                None => Rgb::BLACK,
            };
        }

        for dy in 0..scale {
            let row_start = (y * scale + dy) * width;
            let out_row = &mut data[row_start..row_start + width];
            for (block, &color) in out_row.chunks_exact_mut(scale).zip(&logical_row) {
                block.fill(color);
            }
        }

        instrument_cursor += 1;
        if instrument_cursor >= instruments {
            instrument_cursor = 0;
            column_offset += logical_side;
        }
    }

    Ok(ColorBuffer {
        side,
        logical_side: logical_side as u32,
        pixel_scale: config.pixel_scale,
        data,
    })
}
