//! Render command implementation
//!
//! Loads notes from a MIDI file or notes table, lays them out on a square
//! canvas and writes the canvas as a PNG.

use anyhow::Result;
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use thiserror::Error;

use songart_core::png::{write_rgb_to_vec_with_hash, PngConfig, PngError};
use songart_core::{render, ArtError, GridStats, LayoutConfig};
use songart_midi::InstrumentMapping;

use super::json_output::{error_codes, GridStatsJson, ImageJson, JsonError, JsonWarning, RenderOutput};
use crate::input::{load_input, InputError, InputKind, LoadedInput};
use crate::layout::{resolve_layout, LayoutArgs};

/// Errors from one render run, split by the step that failed.
#[derive(Debug, Error)]
pub enum RenderStepError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Render(#[from] ArtError),

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] PngError),

    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// What a successful render produced.
#[derive(Debug)]
pub struct RenderSummary {
    pub input: LoadedInput,
    pub stats: GridStats,
    pub side: u32,
    pub pixel_scale: u32,
    /// BLAKE3 hash of the written PNG.
    pub hash: String,
}

/// Load, render and write in one step.
pub fn render_to_file(
    input_path: &Path,
    output_path: &Path,
    layout: &LayoutConfig,
    mapping: InstrumentMapping,
) -> Result<RenderSummary, RenderStepError> {
    let input = load_input(input_path, mapping)?;
    let rendering = render(&input.notes, layout)?;
    let (data, hash) = write_rgb_to_vec_with_hash(&rendering.canvas, &PngConfig::default())?;
    fs::write(output_path, &data).map_err(|source| RenderStepError::Write {
        path: output_path.display().to_string(),
        source,
    })?;

    Ok(RenderSummary {
        input,
        stats: rendering.stats,
        side: rendering.canvas.side(),
        pixel_scale: rendering.canvas.pixel_scale(),
        hash,
    })
}

/// Run the render command
///
/// # Arguments
/// * `input` - Path to a `.mid`/`.midi` file or a notes `.csv` table
/// * `output` - Path of the PNG to write
/// * `layout_args` - Layout file and flag overrides
/// * `mapping` - Instrument mapping for MIDI input
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    input: &str,
    output: &str,
    layout_args: &LayoutArgs,
    mapping: InstrumentMapping,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(input, output, layout_args, mapping)
    } else {
        run_human(input, output, layout_args, mapping)
    }
}

/// Run render with human-readable (colored) output
fn run_human(
    input: &str,
    output: &str,
    layout_args: &LayoutArgs,
    mapping: InstrumentMapping,
) -> Result<ExitCode> {
    println!("{} {}", "Rendering:".cyan().bold(), input);

    let layout = resolve_layout(layout_args)?;
    let summary = render_to_file(Path::new(input), Path::new(output), &layout, mapping)?;

    if summary.input.kind == InputKind::Midi {
        println!("{} {}", "Mapping:".dimmed(), mapping);
    }
    for warning in &summary.input.warnings {
        println!("{} {}", "WARNING".yellow().bold(), warning);
    }
    print_stats(summary.input.notes.len(), &summary.stats);
    println!(
        "{} {}x{} ({} cells per side, scale {})",
        "Canvas:".cyan().bold(),
        summary.side,
        summary.side,
        summary.stats.logical_side,
        summary.pixel_scale
    );
    println!("{} Wrote image: {}", "SUCCESS".green().bold(), output);
    println!("{} {}", "Hash:".dimmed(), summary.hash);

    Ok(ExitCode::SUCCESS)
}

/// Print grid statistics shared by `render` and `inspect`.
pub(crate) fn print_stats(note_count: usize, stats: &GridStats) {
    println!("{} {}", "Notes:".cyan().bold(), note_count);
    println!("{} {}", "Instruments:".cyan().bold(), stats.instrument_count);
    println!("{} {}", "Ticks per instrument:".cyan().bold(), stats.tick_count);
    println!("{} {}", "Cells:".cyan().bold(), stats.cell_count());
    println!(
        "{} {}..={}",
        "Pitch range:".cyan().bold(),
        stats.min_pitch,
        stats.max_pitch
    );
}

/// Run render with JSON output
fn run_json(
    input: &str,
    output: &str,
    layout_args: &LayoutArgs,
    mapping: InstrumentMapping,
) -> Result<ExitCode> {
    let report = RenderOutput::new(input);

    let report = match resolve_layout(layout_args) {
        Err(e) => report.fail(JsonError::new(error_codes::LAYOUT, format!("{:#}", e))),
        Ok(layout) => match render_to_file(Path::new(input), Path::new(output), &layout, mapping) {
            Ok(summary) => RenderOutput {
                success: true,
                note_count: Some(summary.input.notes.len()),
                stats: Some(GridStatsJson::from(&summary.stats)),
                image: Some(ImageJson {
                    path: output.to_string(),
                    side: summary.side,
                    pixel_scale: summary.pixel_scale,
                    hash: summary.hash,
                }),
                warnings: summary
                    .input
                    .warnings
                    .iter()
                    .map(|w| JsonWarning::input(w.clone()))
                    .collect(),
                ..report
            },
            Err(e) => report.fail(step_error_json(&e, input, output)),
        },
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Map a failed step onto its JSON error.
pub(crate) fn step_error_json(err: &RenderStepError, input: &str, output: &str) -> JsonError {
    match err {
        RenderStepError::Input(e) => input_error_json(e, input),
        RenderStepError::Render(e) => JsonError::render(e),
        RenderStepError::Encode(_) | RenderStepError::Write { .. } => {
            JsonError::new(error_codes::OUTPUT_WRITE, err.to_string()).with_file(output)
        }
    }
}

pub(crate) fn input_error_json(err: &InputError, input: &str) -> JsonError {
    let code = match err {
        InputError::UnknownExtension { .. } => error_codes::UNKNOWN_EXTENSION,
        InputError::Load { .. } => error_codes::INPUT_LOAD,
    };
    JsonError::new(code, err.to_string()).with_file(input)
}
