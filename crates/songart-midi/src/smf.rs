//! Standard MIDI File loading.
//!
//! Each track is walked with a running tick counter. A note-off closes the
//! oldest open note-on for the same channel and key; a note-on with
//! velocity 0 counts as a note-off.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use midly::{MidiMessage, Smf, Timing, TrackEventKind};
use songart_core::NoteEvent;

use crate::error::MidiError;

/// How notes are assigned to instrument rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstrumentMapping {
    /// Tracks that contain notes, renumbered from 0 in file order.
    #[default]
    CompactTrack,
    /// Raw track chunk index.
    Track,
    /// MIDI channel (0-15).
    Channel,
}

impl InstrumentMapping {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentMapping::CompactTrack => "compact-track",
            InstrumentMapping::Track => "track",
            InstrumentMapping::Channel => "channel",
        }
    }
}

impl fmt::Display for InstrumentMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstrumentMapping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact-track" => Ok(InstrumentMapping::CompactTrack),
            "track" => Ok(InstrumentMapping::Track),
            "channel" => Ok(InstrumentMapping::Channel),
            other => Err(format!(
                "unknown instrument mapping '{}' (expected compact-track, track, or channel)",
                other
            )),
        }
    }
}

/// Notes flattened out of a MIDI file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedNotes {
    /// Ordered by instrument, then start tick, then note-on order.
    pub notes: Vec<NoteEvent>,
    /// Number of track chunks in the file.
    pub track_count: usize,
    /// Ticks per quarter note, for metrical files.
    pub ticks_per_beat: Option<u16>,
    /// Note-ons that were never closed before their track ended.
    pub unterminated: usize,
    /// Note-offs with no matching open note.
    pub stray_note_offs: usize,
}

/// A closed note before instrument assignment.
struct RawNote {
    track: usize,
    channel: u8,
    key: u8,
    start: u64,
    end: u64,
    order: usize,
}

/// Parse SMF bytes into note events.
pub fn load_notes(bytes: &[u8], mapping: InstrumentMapping) -> Result<LoadedNotes, MidiError> {
    let smf = Smf::parse(bytes)?;

    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(ticks) => Some(ticks.as_int()),
        Timing::Timecode(_, _) => None,
    };

    let mut raw = Vec::new();
    let mut unterminated = 0;
    let mut stray_note_offs = 0;
    for (track_index, track) in smf.tracks.iter().enumerate() {
        let mut open: HashMap<(u8, u8), VecDeque<(u64, usize)>> = HashMap::new();
        let mut tick: u64 = 0;
        for (order, event) in track.iter().enumerate() {
            tick += u64::from(event.delta.as_int());
            let TrackEventKind::Midi { channel, message } = event.kind else {
                continue;
            };
            let (key, is_on) = match message {
                MidiMessage::NoteOn { key, vel } => (key.as_int(), vel.as_int() > 0),
                MidiMessage::NoteOff { key, .. } => (key.as_int(), false),
                _ => continue,
            };
            let slot = (channel.as_int(), key);
            if is_on {
                open.entry(slot).or_default().push_back((tick, order));
            } else if let Some((start, order)) = open.get_mut(&slot).and_then(VecDeque::pop_front) {
                raw.push(RawNote {
                    track: track_index,
                    channel: slot.0,
                    key,
                    start,
                    end: tick,
                    order,
                });
            } else {
                stray_note_offs += 1;
            }
        }
        unterminated += open.values().map(VecDeque::len).sum::<usize>();
    }

    let instrument_of = instrument_assigner(&raw, smf.tracks.len(), mapping);
    let mut keyed = Vec::with_capacity(raw.len());
    for note in &raw {
        let instrument = instrument_of(note);
        keyed.push(((instrument, note.start, note.track, note.order), note));
    }
    keyed.sort_by_key(|(key, _)| *key);

    let mut notes = Vec::with_capacity(keyed.len());
    for ((instrument, ..), note) in keyed {
        notes.push(NoteEvent::new(
            to_i64(instrument as u64),
            to_i64(note.start),
            i32::from(note.key),
            to_i64(note.end - note.start),
        )?);
    }

    Ok(LoadedNotes {
        notes,
        track_count: smf.tracks.len(),
        ticks_per_beat,
        unterminated,
        stray_note_offs,
    })
}

/// Read and parse a MIDI file.
pub fn load_notes_from_path(path: &Path, mapping: InstrumentMapping) -> Result<LoadedNotes, MidiError> {
    let bytes = std::fs::read(path)?;
    load_notes(&bytes, mapping)
}

fn instrument_assigner(
    raw: &[RawNote],
    track_count: usize,
    mapping: InstrumentMapping,
) -> Box<dyn Fn(&RawNote) -> usize> {
    match mapping {
        InstrumentMapping::Track => Box::new(|note: &RawNote| note.track),
        InstrumentMapping::Channel => Box::new(|note: &RawNote| usize::from(note.channel)),
        InstrumentMapping::CompactTrack => {
            let mut has_notes = vec![false; track_count];
            for note in raw {
                has_notes[note.track] = true;
            }
            let mut compact = vec![0usize; track_count];
            let mut next = 0;
            for (track, used) in has_notes.into_iter().enumerate() {
                if used {
                    compact[track] = next;
                    next += 1;
                }
            }
            Box::new(move |note: &RawNote| compact[note.track])
        }
    }
}

// Values beyond i64 are rejected by NoteEvent::new as out of range anyway.
fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
