//! Test fixture utilities for synthetic songs and MIDI files.

use std::fs;
use std::path::{Path, PathBuf};

use midly::num::{u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};
use songart_core::NoteEvent;

/// Build a note, panicking on out-of-range values.
pub fn note(instrument: i64, start: i64, pitch: i32, duration: i64) -> NoteEvent {
    NoteEvent::new(instrument, start, pitch, duration).expect("valid note")
}

/// Three instruments with overlapping notes and a silent gap.
///
/// Grid shape is 3 x 16, so the logical canvas side is 6.
pub fn sample_song() -> Vec<NoteEvent> {
    vec![
        note(0, 0, 60, 8),
        note(0, 8, 64, 8),
        note(1, 4, 48, 4),
        note(2, 0, 72, 2),
        note(2, 1, 67, 3),
    ]
}

/// A note or raw event at an absolute tick.
#[derive(Debug, Clone, Copy)]
enum Pending {
    On { channel: u8, key: u8, vel: u8 },
    Off { channel: u8, key: u8 },
    Tempo,
}

/// Events of one track, placed at absolute ticks.
#[derive(Debug, Default)]
pub struct TrackBuilder {
    events: Vec<(u32, Pending)>,
}

impl TrackBuilder {
    /// Add a note with velocity 100.
    pub fn note(self, channel: u8, key: u8, start: u32, duration: u32) -> Self {
        self.note_on(channel, key, start, 100).note_off(channel, key, start + duration)
    }

    pub fn note_on(mut self, channel: u8, key: u8, tick: u32, vel: u8) -> Self {
        self.events.push((tick, Pending::On { channel, key, vel }));
        self
    }

    pub fn note_off(mut self, channel: u8, key: u8, tick: u32) -> Self {
        self.events.push((tick, Pending::Off { channel, key }));
        self
    }

    pub fn tempo(mut self, tick: u32) -> Self {
        self.events.push((tick, Pending::Tempo));
        self
    }

    fn into_track(mut self) -> Track<'static> {
        // Offs sort before ons at the same tick so back-to-back notes on one
        // key pair up the way a sequencer writes them.
        self.events
            .sort_by_key(|(tick, event)| (*tick, matches!(event, Pending::On { .. })));

        let mut track = Vec::with_capacity(self.events.len() + 1);
        let mut last = 0;
        for (tick, event) in self.events {
            let kind = match event {
                Pending::On { channel, key, vel } => TrackEventKind::Midi {
                    channel: u4::new(channel),
                    message: MidiMessage::NoteOn {
                        key: u7::new(key),
                        vel: u7::new(vel),
                    },
                },
                Pending::Off { channel, key } => TrackEventKind::Midi {
                    channel: u4::new(channel),
                    message: MidiMessage::NoteOff {
                        key: u7::new(key),
                        vel: u7::new(0),
                    },
                },
                Pending::Tempo => TrackEventKind::Meta(MetaMessage::Tempo(u24::new(500_000))),
            };
            track.push(TrackEvent {
                delta: u28::new(tick - last),
                kind,
            });
            last = tick;
        }
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        track
    }
}

/// Builder for multi-track Standard MIDI Files.
#[derive(Debug)]
pub struct SmfBuilder {
    ticks_per_beat: u16,
    tracks: Vec<TrackBuilder>,
}

impl SmfBuilder {
    pub fn new(ticks_per_beat: u16) -> Self {
        Self {
            ticks_per_beat,
            tracks: Vec::new(),
        }
    }

    /// Add a track holding only a tempo event.
    pub fn conductor_track(mut self) -> Self {
        self.tracks.push(TrackBuilder::default().tempo(0));
        self
    }

    pub fn track(mut self, build: impl FnOnce(TrackBuilder) -> TrackBuilder) -> Self {
        self.tracks.push(build(TrackBuilder::default()));
        self
    }

    pub fn to_bytes(self) -> Vec<u8> {
        let format = if self.tracks.len() == 1 {
            Format::SingleTrack
        } else {
            Format::Parallel
        };
        let mut smf = Smf::new(Header::new(
            format,
            Timing::Metrical(u15::new(self.ticks_per_beat)),
        ));
        smf.tracks = self.tracks.into_iter().map(TrackBuilder::into_track).collect();

        let mut buf = Vec::new();
        smf.write(&mut buf).expect("Failed to write SMF");
        buf
    }
}

/// A format-1 file: conductor track, then three instrument tracks on
/// channels 0, 1 and 9.
///
/// With compact-track mapping the notes match [`sample_song`].
pub fn sample_smf() -> Vec<u8> {
    SmfBuilder::new(96)
        .conductor_track()
        .track(|t| t.note(0, 60, 0, 8).note(0, 64, 8, 8))
        .track(|t| t.note(1, 48, 4, 4))
        .track(|t| t.note(9, 72, 0, 2).note(9, 67, 1, 3))
        .to_bytes()
}

/// Write bytes under `dir` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write fixture file");
    path
}

/// Decoded PNG: (width, height, color type, pixel bytes).
pub fn decode_png(bytes: &[u8]) -> (u32, u32, png::ColorType, Vec<u8>) {
    let decoder = png::Decoder::new(bytes);
    let mut reader = decoder.read_info().expect("Failed to read PNG header");
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("Failed to decode PNG");
    buf.truncate(info.buffer_size());
    (info.width, info.height, info.color_type, buf)
}
