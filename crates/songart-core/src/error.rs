//! Error types for the note-to-image pipeline.

use thiserror::Error;

/// Errors from building an intensity grid or mapping it onto a canvas.
///
/// Every variant is terminal for the call that produced it; no partially
/// built grid or buffer is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtError {
    /// A note event could not be constructed from the given values.
    #[error("invalid note: {0}")]
    InvalidInput(String),

    /// No note events were supplied, so no grid range can be derived.
    #[error("no note events to build a grid from")]
    EmptyInput,

    /// The grid has a zero dimension and cannot be laid out on a canvas.
    #[error("grid is degenerate ({instruments} instruments x {ticks} ticks)")]
    DegenerateInput { instruments: usize, ticks: usize },

    /// The layout configuration is unusable.
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),

    /// The grid would not fit in addressable memory.
    #[error("grid of {instruments} instruments x {ticks} ticks is too large")]
    GridTooLarge { instruments: usize, ticks: usize },
}

impl ArtError {
    /// Returns a short stable identifier for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ArtError::InvalidInput(_) => "invalid_input",
            ArtError::EmptyInput => "empty_input",
            ArtError::DegenerateInput { .. } => "degenerate_input",
            ArtError::InvalidConfig(_) => "invalid_config",
            ArtError::GridTooLarge { .. } => "grid_too_large",
        }
    }
}
