//! Note event model.

use crate::error::ArtError;

/// One played note, positioned on an instrument row and a tick range.
///
/// Instances are immutable once constructed; use [`NoteEvent::new`] to
/// validate raw integers coming from an upstream parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteEvent {
    instrument: u32,
    start_tick: u32,
    pitch: i32,
    duration_ticks: u32,
}

impl NoteEvent {
    /// Create a note event.
    ///
    /// # Arguments
    /// * `instrument` - Zero-based instrument (row) index
    /// * `start_tick` - First tick the note occupies
    /// * `pitch` - Pitch number, usually a MIDI key in 0-127
    /// * `duration_ticks` - Number of ticks the note occupies; zero is allowed
    ///
    /// # Returns
    /// * `Err(ArtError::InvalidInput)` if any position or length is negative
    ///   or does not fit in 32 bits
    pub fn new(
        instrument: i64,
        start_tick: i64,
        pitch: i32,
        duration_ticks: i64,
    ) -> Result<Self, ArtError> {
        Ok(Self {
            instrument: non_negative_u32("instrument", instrument)?,
            start_tick: non_negative_u32("start_tick", start_tick)?,
            pitch,
            duration_ticks: non_negative_u32("duration_ticks", duration_ticks)?,
        })
    }

    /// Zero-based instrument index.
    #[inline]
    pub fn instrument(&self) -> u32 {
        self.instrument
    }

    /// First tick covered by the note.
    #[inline]
    pub fn start_tick(&self) -> u32 {
        self.start_tick
    }

    #[inline]
    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    #[inline]
    pub fn duration_ticks(&self) -> u32 {
        self.duration_ticks
    }

    /// One past the last tick covered by the note.
    #[inline]
    pub fn end_tick(&self) -> u64 {
        u64::from(self.start_tick) + u64::from(self.duration_ticks)
    }
}

fn non_negative_u32(name: &str, value: i64) -> Result<u32, ArtError> {
    if value < 0 {
        return Err(ArtError::InvalidInput(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    u32::try_from(value).map_err(|_| {
        ArtError::InvalidInput(format!("{} is out of range, got {}", name, value))
    })
}
