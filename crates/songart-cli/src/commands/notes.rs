//! Notes command implementation
//!
//! Writes the flattened notes of a MIDI file (or an existing notes table) as
//! an `instrument,start_tick,pitch,duration_ticks` table.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use songart_midi::{write_notes_csv_to_path, InstrumentMapping};

use crate::input::{load_input, InputKind};

/// Run the notes command
///
/// # Arguments
/// * `input` - Path to a `.mid`/`.midi` file or a notes `.csv` table
/// * `output` - Path of the table to write
/// * `mapping` - Instrument mapping for MIDI input
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(input: &str, output: &str, mapping: InstrumentMapping) -> Result<ExitCode> {
    println!("{} {}", "Reading notes:".cyan().bold(), input);

    let loaded = load_input(Path::new(input), mapping)?;
    if loaded.kind == InputKind::Midi {
        println!("{} {}", "Mapping:".dimmed(), mapping);
        if let Some(tracks) = loaded.track_count {
            println!("{} {}", "Tracks:".dimmed(), tracks);
        }
    }
    for warning in &loaded.warnings {
        println!("{} {}", "WARNING".yellow().bold(), warning);
    }

    write_notes_csv_to_path(&loaded.notes, Path::new(output))
        .with_context(|| format!("Failed to write notes table: {}", output))?;

    println!(
        "{} Wrote {} notes to: {}",
        "SUCCESS".green().bold(),
        loaded.notes.len(),
        output
    );

    Ok(ExitCode::SUCCESS)
}
