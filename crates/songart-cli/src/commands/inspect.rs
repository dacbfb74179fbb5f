//! Inspect command implementation
//!
//! Prints the grid shape and pitch range of an input, and the canvas side a
//! render would produce, without writing an image.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use songart_core::{inspect, GridStats};
use songart_midi::InstrumentMapping;

use super::json_output::{GridStatsJson, JsonError, JsonWarning, RenderOutput};
use super::render::{input_error_json, print_stats};
use crate::input::load_input;

/// Run the inspect command
///
/// # Arguments
/// * `input` - Path to a `.mid`/`.midi` file or a notes `.csv` table
/// * `mapping` - Instrument mapping for MIDI input
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(input: &str, mapping: InstrumentMapping, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input, mapping)
    } else {
        run_human(input, mapping)
    }
}

fn run_human(input: &str, mapping: InstrumentMapping) -> Result<ExitCode> {
    println!("{} {}", "Inspecting:".cyan().bold(), input);

    let loaded = load_input(Path::new(input), mapping)?;
    for warning in &loaded.warnings {
        println!("{} {}", "WARNING".yellow().bold(), warning);
    }

    let stats = inspect(&loaded.notes)?;
    print_stats(loaded.notes.len(), &stats);
    if is_degenerate(&stats) {
        println!(
            "{} grid has no cells; render would fail",
            "WARNING".yellow().bold()
        );
    } else {
        println!(
            "{} {} cells per side",
            "Canvas:".cyan().bold(),
            stats.logical_side
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn run_json(input: &str, mapping: InstrumentMapping) -> Result<ExitCode> {
    let report = RenderOutput::new(input);

    let report = match load_input(Path::new(input), mapping) {
        Err(e) => report.fail(input_error_json(&e, input)),
        Ok(loaded) => {
            let warnings: Vec<JsonWarning> =
                loaded.warnings.iter().map(|w| JsonWarning::input(w.clone())).collect();
            match inspect(&loaded.notes) {
                Ok(stats) => RenderOutput {
                    success: true,
                    note_count: Some(loaded.notes.len()),
                    stats: Some(GridStatsJson::from(&stats)),
                    warnings,
                    ..report
                },
                Err(e) => RenderOutput { warnings, ..report }.fail(JsonError::render(&e)),
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn is_degenerate(stats: &GridStats) -> bool {
    stats.cell_count() == 0
}
