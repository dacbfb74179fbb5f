//! Intensity grid construction.
//!
//! A grid has one row per instrument and one column per tick. Each cell holds
//! the normalized pitch (0-255) of the note covering it, or 0 for silence.

use crate::error::ArtError;
use crate::note::NoteEvent;

/// Maximum intensity value stored in a grid cell.
pub const MAX_INTENSITY: u8 = 255;

/// Dense per-instrument, per-tick intensity grid.
///
/// Storage is row-major (`instrument * tick_count + tick`). Reads are
/// bounds-checked through [`IntensityGrid::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityGrid {
    instrument_count: usize,
    tick_count: usize,
    min_pitch: i32,
    max_pitch: i32,
    cells: Vec<u8>,
}

impl IntensityGrid {
    /// Number of instrument rows.
    #[inline]
    pub fn instrument_count(&self) -> usize {
        self.instrument_count
    }

    /// Number of tick columns.
    #[inline]
    pub fn tick_count(&self) -> usize {
        self.tick_count
    }

    /// Total number of cells (`instrument_count * tick_count`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Lowest pitch seen while building the grid.
    pub fn min_pitch(&self) -> i32 {
        self.min_pitch
    }

    /// Highest pitch seen while building the grid.
    pub fn max_pitch(&self) -> i32 {
        self.max_pitch
    }

    /// Intensity at `(instrument, tick)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, instrument: usize, tick: usize) -> Option<u8> {
        if instrument < self.instrument_count && tick < self.tick_count {
            Some(self.cells[instrument * self.tick_count + tick])
        } else {
            None
        }
    }

    /// One instrument's row, or `None` outside the grid.
    pub fn row(&self, instrument: usize) -> Option<&[u8]> {
        if instrument < self.instrument_count {
            let start = instrument * self.tick_count;
            Some(&self.cells[start..start + self.tick_count])
        } else {
            None
        }
    }

    /// Raw row-major cell data.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

/// Normalize a pitch into `[0, 255]` against the observed pitch range.
///
/// A single-pitch range maps everything to 0 instead of dividing by zero.
pub fn normalize_pitch(pitch: i32, min_pitch: i32, max_pitch: i32) -> u8 {
    if max_pitch <= min_pitch {
        return 0;
    }
    let span = i64::from(max_pitch) - i64::from(min_pitch);
    let offset = i64::from(pitch) - i64::from(min_pitch);
    (i64::from(MAX_INTENSITY) * offset / span).clamp(0, i64::from(MAX_INTENSITY)) as u8
}

/// Build an intensity grid from note events.
///
/// Notes are written in input order; when two notes of the same instrument
/// cover the same tick the later one wins.
///
/// # Returns
/// * `Err(ArtError::EmptyInput)` if `events` is empty
/// * `Err(ArtError::GridTooLarge)` if the grid would not fit in memory
pub fn build(events: &[NoteEvent]) -> Result<IntensityGrid, ArtError> {
    let first = events.first().ok_or(ArtError::EmptyInput)?;

    let mut min_pitch = first.pitch();
    let mut max_pitch = first.pitch();
    let mut max_instrument = first.instrument();
    let mut max_end = first.end_tick();
    for event in &events[1..] {
        min_pitch = min_pitch.min(event.pitch());
        max_pitch = max_pitch.max(event.pitch());
        max_instrument = max_instrument.max(event.instrument());
        max_end = max_end.max(event.end_tick());
    }

    let instruments = max_instrument as usize + 1;
    let ticks = usize::try_from(max_end).map_err(|_| ArtError::GridTooLarge {
        instruments,
        ticks: usize::MAX,
    })?;
    let size = instruments
        .checked_mul(ticks)
        .ok_or(ArtError::GridTooLarge { instruments, ticks })?;

    let mut cells = Vec::new();
    cells
        .try_reserve_exact(size)
        .map_err(|_| ArtError::GridTooLarge { instruments, ticks })?;
    cells.resize(size, 0u8);
    for event in events {
        let intensity = normalize_pitch(event.pitch(), min_pitch, max_pitch);
        let row = event.instrument() as usize * ticks;
        let start = row + event.start_tick() as usize;
        let end = start + event.duration_ticks() as usize;
        cells[start..end].fill(intensity);
    }

    Ok(IntensityGrid {
        instrument_count: instruments,
        tick_count: ticks,
        min_pitch,
        max_pitch,
        cells,
    })
}
