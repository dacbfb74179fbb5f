//! End-to-end rendering tests: input file -> PNG on disk.
//!
//! These drive the CLI command layer against temp directories and decode the
//! written PNGs to check dimensions and pixels.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p songart-tests --test e2e_render
//! ```

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use pretty_assertions::assert_eq;
use songart_cli::commands::render::{render_to_file, RenderStepError};
use songart_cli::commands::{inspect, notes, render};
use songart_cli::layout::LayoutArgs;
use songart_core::png::hash_png;
use songart_core::{ArtError, LayoutConfig};
use songart_midi::{write_notes_csv_to_path, InstrumentMapping};
use songart_tests::fixtures::{decode_png, sample_smf, sample_song, write_file};

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Pixel at (x, y) of a decoded RGB image.
fn pixel(data: &[u8], side: u32, x: u32, y: u32) -> [u8; 3] {
    let i = ((y * side + x) * 3) as usize;
    [data[i], data[i + 1], data[i + 2]]
}

// ============================================================================
// MIDI and notes table inputs
// ============================================================================

#[test]
fn test_render_midi_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "song.mid", sample_smf());
    let output = dir.path().join("art.png");

    let summary = render_to_file(
        &input,
        &output,
        &LayoutConfig::default(),
        InstrumentMapping::CompactTrack,
    )
    .unwrap();

    assert_eq!(summary.stats.instrument_count, 3);
    assert_eq!(summary.stats.tick_count, 16);
    assert_eq!(summary.stats.logical_side, 6);
    assert_eq!(summary.side, 6);
    assert_eq!(summary.input.track_count, Some(4));
    assert!(summary.input.warnings.is_empty());

    let bytes = fs::read(&output).unwrap();
    let (width, height, color_type, data) = decode_png(&bytes);
    assert_eq!((width, height), (6, 6));
    assert_eq!(color_type, png::ColorType::Rgb);

    // Row 0: instrument 0, ticks 0..6, pitch 60 in 48..=72
    assert_eq!(pixel(&data, 6, 0, 0), [127, 127, 0]);
    // Row 1: instrument 1 only plays the lowest pitch
    assert_eq!(pixel(&data, 6, 4, 1), [0, 0, 0]);
    // Row 2: instrument 2, the later note overwrites tick 1
    assert_eq!(pixel(&data, 6, 0, 2), [255, 255, 0]);
    assert_eq!(pixel(&data, 6, 1, 2), [201, 201, 0]);
    assert_eq!(pixel(&data, 6, 4, 2), [0, 0, 0]);
    // Row 3: instrument 0 again, ticks 6..12
    assert_eq!(pixel(&data, 6, 1, 3), [127, 127, 0]);
    assert_eq!(pixel(&data, 6, 2, 3), [170, 170, 0]);
}

#[test]
fn test_midi_and_table_render_identically() {
    let dir = tempfile::tempdir().unwrap();
    let midi = write_file(dir.path(), "song.mid", sample_smf());
    let table = dir.path().join("notes.csv");
    write_notes_csv_to_path(&sample_song(), &table).unwrap();

    let layout = LayoutConfig::default().with_pixel_scale(3);
    let from_midi = render_to_file(
        &midi,
        &dir.path().join("a.png"),
        &layout,
        InstrumentMapping::default(),
    )
    .unwrap();
    let from_table = render_to_file(
        &table,
        &dir.path().join("b.png"),
        &layout,
        InstrumentMapping::default(),
    )
    .unwrap();

    assert_eq!(from_midi.hash, from_table.hash);
    assert_eq!(from_midi.side, 18);
}

#[test]
fn test_mapping_changes_grid_shape() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "song.mid", sample_smf());
    let output = dir.path().join("art.png");

    // Raw track index keeps the empty conductor row.
    let summary =
        render_to_file(&input, &output, &LayoutConfig::default(), InstrumentMapping::Track)
            .unwrap();
    assert_eq!(summary.stats.instrument_count, 4);
    assert_eq!(summary.side, 8);

    // Channels 0, 1 and 9 give ten rows.
    let summary =
        render_to_file(&input, &output, &LayoutConfig::default(), InstrumentMapping::Channel)
            .unwrap();
    assert_eq!(summary.stats.instrument_count, 10);
    assert_eq!(summary.side, 12);
}

// ============================================================================
// Command entry points
// ============================================================================

#[test]
fn test_render_command_with_layout_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "song.mid", sample_smf());
    let layout = write_file(
        dir.path(),
        "layout.json",
        r#"{"pixel_scale": 2, "channel_weights": {"r": 0.0, "g": 0.0, "b": 1.0}}"#,
    );
    let output = dir.path().join("art.png");

    let args = LayoutArgs {
        config: Some(path_str(&layout)),
        ..LayoutArgs::default()
    };
    let code = render::run(
        &path_str(&input),
        &path_str(&output),
        &args,
        InstrumentMapping::default(),
        true,
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let (width, _, _, data) = decode_png(&fs::read(&output).unwrap());
    assert_eq!(width, 12);
    assert_eq!(pixel(&data, 12, 0, 4), [0, 0, 255]);
    assert_eq!(pixel(&data, 12, 1, 5), [0, 0, 255]);
}

#[test]
fn test_render_command_zero_scale_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "song.mid", sample_smf());
    let output = dir.path().join("art.png");

    let args = LayoutArgs {
        pixel_scale: Some(0),
        ..LayoutArgs::default()
    };
    let code = render::run(
        &path_str(&input),
        &path_str(&output),
        &args,
        InstrumentMapping::default(),
        true,
    )
    .unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert!(!output.exists());

    let err = render::run(
        &path_str(&input),
        &path_str(&output),
        &args,
        InstrumentMapping::default(),
        false,
    )
    .unwrap_err();
    let step = err.downcast_ref::<RenderStepError>().unwrap();
    assert!(matches!(step, RenderStepError::Render(ArtError::InvalidConfig(_))));
}

#[test]
fn test_render_command_huge_scale_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "song.mid", sample_smf());
    let output = dir.path().join("art.png");

    let args = LayoutArgs {
        pixel_scale: Some(u32::MAX),
        ..LayoutArgs::default()
    };
    let code = render::run(
        &path_str(&input),
        &path_str(&output),
        &args,
        InstrumentMapping::default(),
        true,
    )
    .unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert!(!output.exists());
}

#[test]
fn test_notes_command_writes_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "song.mid", sample_smf());
    let output = dir.path().join("notes.csv");

    let code = notes::run(&path_str(&input), &path_str(&output), InstrumentMapping::default())
        .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "instrument,start_tick,pitch,duration_ticks\n\
         0,0,60,8\n\
         0,8,64,8\n\
         1,4,48,4\n\
         2,0,72,2\n\
         2,1,67,3\n"
    );
}

#[test]
fn test_inspect_command() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "song.mid", sample_smf());

    let code = inspect::run(&path_str(&input), InstrumentMapping::default(), false).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let missing = dir.path().join("missing.csv");
    let code = inspect::run(&path_str(&missing), InstrumentMapping::default(), true).unwrap();
    assert_eq!(code, ExitCode::from(1));
}

#[test]
fn test_zero_length_song_is_degenerate() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(
        dir.path(),
        "notes.csv",
        "instrument,start_tick,pitch,duration_ticks\n0,0,60,0\n1,0,62,0\n",
    );
    let output = dir.path().join("art.png");

    let err = render_to_file(&input, &output, &LayoutConfig::default(), InstrumentMapping::default())
        .unwrap_err();
    assert!(matches!(
        err,
        RenderStepError::Render(ArtError::DegenerateInput {
            instruments: 2,
            ticks: 0
        })
    ));
    assert!(!output.exists());

    // Inspect still reports the shape.
    let code = inspect::run(&path_str(&input), InstrumentMapping::default(), false).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn test_written_hash_matches_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "song.mid", sample_smf());
    let output = dir.path().join("art.png");

    let summary = render_to_file(&input, &output, &LayoutConfig::default(), InstrumentMapping::default())
        .unwrap();
    assert_eq!(hash_png(&fs::read(&output).unwrap()), summary.hash);
}
