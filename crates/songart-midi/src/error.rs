//! Errors from loading note events.

use songart_core::ArtError;
use thiserror::Error;

/// Errors from reading MIDI files or notes tables.
#[derive(Debug, Error)]
pub enum MidiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("MIDI parse error: {0}")]
    Parse(#[from] midly::Error),

    #[error(transparent)]
    Note(#[from] ArtError),

    #[error("notes table line {line}: {message}")]
    Csv { line: usize, message: String },
}

impl MidiError {
    pub(crate) fn csv(line: usize, message: impl Into<String>) -> Self {
        MidiError::Csv {
            line,
            message: message.into(),
        }
    }
}
