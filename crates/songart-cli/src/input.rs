//! Note input loading.
//!
//! Dispatches by file extension: Standard MIDI Files are flattened with the
//! chosen instrument mapping, notes tables are read as-is.

use std::path::{Path, PathBuf};

use serde::Serialize;
use songart_core::NoteEvent;
use songart_midi::{load_notes_from_path, read_notes_csv_from_path, InstrumentMapping, MidiError};
use thiserror::Error;

/// Recognized MIDI extensions.
pub const MIDI_EXTENSIONS: &[&str] = &["mid", "midi"];

/// Recognized notes table extensions.
pub const CSV_EXTENSIONS: &[&str] = &["csv"];

/// Source format of a note input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Midi,
    NotesCsv,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Midi => "midi",
            InputKind::NotesCsv => "notes_csv",
        }
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Notes loaded from any supported input.
#[derive(Debug)]
pub struct LoadedInput {
    pub kind: InputKind,
    pub notes: Vec<NoteEvent>,
    /// Track chunks in the file (MIDI only).
    pub track_count: Option<usize>,
    /// Non-fatal problems found while loading.
    pub warnings: Vec<String>,
}

/// Errors from loading a note input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{}", unknown_extension_message(.extension))]
    UnknownExtension { extension: Option<String> },

    #[error("failed to load '{}': {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: MidiError,
    },
}

fn unknown_extension_message(extension: &Option<String>) -> String {
    match extension {
        Some(ext) => format!(
            "unknown file extension '.{}' (expected .mid, .midi or .csv)",
            ext
        ),
        None => "file has no extension (expected .mid, .midi or .csv)".to_string(),
    }
}

/// Detect the input kind from a path's extension.
pub fn detect_input_kind(path: &Path) -> Result<InputKind, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some(ext) if MIDI_EXTENSIONS.contains(&ext) => Ok(InputKind::Midi),
        Some(ext) if CSV_EXTENSIONS.contains(&ext) => Ok(InputKind::NotesCsv),
        _ => Err(InputError::UnknownExtension { extension }),
    }
}

/// Load notes from a MIDI file or notes table.
///
/// `mapping` only applies to MIDI input.
pub fn load_input(path: &Path, mapping: InstrumentMapping) -> Result<LoadedInput, InputError> {
    let kind = detect_input_kind(path)?;
    let wrap = |source| InputError::Load {
        path: path.to_path_buf(),
        source,
    };

    match kind {
        InputKind::Midi => {
            let loaded = load_notes_from_path(path, mapping).map_err(wrap)?;
            let mut warnings = Vec::new();
            if loaded.unterminated > 0 {
                warnings.push(format!(
                    "{} note(s) never received a note-off and were dropped",
                    loaded.unterminated
                ));
            }
            if loaded.stray_note_offs > 0 {
                warnings.push(format!(
                    "{} note-off(s) had no matching note-on",
                    loaded.stray_note_offs
                ));
            }
            Ok(LoadedInput {
                kind,
                notes: loaded.notes,
                track_count: Some(loaded.track_count),
                warnings,
            })
        }
        InputKind::NotesCsv => Ok(LoadedInput {
            kind,
            notes: read_notes_csv_from_path(path).map_err(wrap)?,
            track_count: None,
            warnings: Vec::new(),
        }),
    }
}
