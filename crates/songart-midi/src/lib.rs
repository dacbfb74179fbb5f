//! Note sources for SongArt.
//!
//! Flattens Standard MIDI Files into [`NoteEvent`](songart_core::NoteEvent)
//! lists, and reads or writes the plain notes table
//! (`instrument,start_tick,pitch,duration_ticks`).

pub mod csv;
pub mod error;
pub mod smf;

pub use csv::{read_notes_csv, read_notes_csv_from_path, write_notes_csv, write_notes_csv_to_path};
pub use error::MidiError;
pub use smf::{load_notes, load_notes_from_path, InstrumentMapping, LoadedNotes};
