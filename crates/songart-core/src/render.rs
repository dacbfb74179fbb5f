//! One-shot note-to-canvas rendering.

use crate::canvas::{self, ColorBuffer};
use crate::config::LayoutConfig;
use crate::error::ArtError;
use crate::grid::{self, IntensityGrid};
use crate::note::NoteEvent;

/// Shape and range summary of a built grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStats {
    pub instrument_count: usize,
    pub tick_count: usize,
    pub min_pitch: i32,
    pub max_pitch: i32,
    /// Canvas side in logical cells.
    pub logical_side: u64,
}

impl GridStats {
    pub fn from_grid(grid: &IntensityGrid) -> Self {
        Self {
            instrument_count: grid.instrument_count(),
            tick_count: grid.tick_count(),
            min_pitch: grid.min_pitch(),
            max_pitch: grid.max_pitch(),
            logical_side: canvas::logical_side_for(grid.instrument_count(), grid.tick_count()),
        }
    }

    /// Number of grid cells (`instrument_count * tick_count`).
    pub fn cell_count(&self) -> u64 {
        self.instrument_count as u64 * self.tick_count as u64
    }
}

/// Output of [`render`].
#[derive(Debug, Clone)]
pub struct Rendering {
    pub stats: GridStats,
    pub canvas: ColorBuffer,
}

/// Build the grid for `events` and lay it out on a canvas.
///
/// Fails with the first error from either stage; nothing partial is returned.
pub fn render(events: &[NoteEvent], config: &LayoutConfig) -> Result<Rendering, ArtError> {
    let grid = grid::build(events)?;
    let canvas = canvas::map(&grid, config)?;
    Ok(Rendering {
        stats: GridStats::from_grid(&grid),
        canvas,
    })
}

/// Build the grid for `events` and summarize it without mapping.
pub fn inspect(events: &[NoteEvent]) -> Result<GridStats, ArtError> {
    grid::build(events).map(|grid| GridStats::from_grid(&grid))
}
