//! SongArt CLI - renders the notes of a song as a square image
//!
//! This binary provides commands for rendering MIDI files or notes tables to
//! PNG, exporting the flattened notes table, and inspecting the grid shape.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use songart_cli::commands;
use songart_cli::layout::LayoutArgs;
use songart_midi::InstrumentMapping;

/// SongArt - Note Events to Image
#[derive(Parser)]
#[command(name = "songart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a MIDI file or notes table to a PNG
    Render {
        /// Path to the input (.mid, .midi or .csv)
        #[arg(short, long)]
        input: String,

        /// Path of the PNG to write
        #[arg(short, long)]
        output: String,

        /// Output pixels per grid cell along each axis
        #[arg(long)]
        pixel_scale: Option<u32>,

        /// Channel weights as R,G,B (e.g. 1,1,0)
        #[arg(long)]
        weights: Option<String>,

        /// JSON layout file; flags override its values
        #[arg(long)]
        config: Option<String>,

        /// How MIDI tracks/channels become instruments
        #[arg(long, default_value = "compact-track", value_parser = ["compact-track", "track", "channel"])]
        mapping: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Write the flattened notes table of an input
    Notes {
        /// Path to the input (.mid, .midi or .csv)
        #[arg(short, long)]
        input: String,

        /// Path of the notes table to write
        #[arg(short, long)]
        output: String,

        /// How MIDI tracks/channels become instruments
        #[arg(long, default_value = "compact-track", value_parser = ["compact-track", "track", "channel"])]
        mapping: String,
    },

    /// Print grid statistics without writing an image
    Inspect {
        /// Path to the input (.mid, .midi or .csv)
        #[arg(short, long)]
        input: String,

        /// How MIDI tracks/channels become instruments
        #[arg(long, default_value = "compact-track", value_parser = ["compact-track", "track", "channel"])]
        mapping: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn parse_mapping(mapping: &str) -> InstrumentMapping {
    mapping
        .parse::<InstrumentMapping>()
        .expect("clap should have validated mapping")
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            pixel_scale,
            weights,
            config,
            mapping,
            json,
        } => {
            let layout_args = LayoutArgs {
                config,
                pixel_scale,
                weights,
            };
            commands::render::run(&input, &output, &layout_args, parse_mapping(&mapping), json)
        }
        Commands::Notes {
            input,
            output,
            mapping,
        } => commands::notes::run(&input, &output, parse_mapping(&mapping)),
        Commands::Inspect {
            input,
            mapping,
            json,
        } => commands::inspect::run(&input, parse_mapping(&mapping), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "songart",
            "render",
            "-i",
            "song.mid",
            "-o",
            "art.png",
            "--pixel-scale",
            "4",
            "--weights",
            "1,0,1",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                input,
                output,
                pixel_scale,
                weights,
                config,
                mapping,
                json,
            } => {
                assert_eq!(input, "song.mid");
                assert_eq!(output, "art.png");
                assert_eq!(pixel_scale, Some(4));
                assert_eq!(weights.as_deref(), Some("1,0,1"));
                assert!(config.is_none());
                assert_eq!(parse_mapping(&mapping), InstrumentMapping::CompactTrack);
                assert!(!json);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_parses_render_with_mapping_and_json() {
        let cli = Cli::try_parse_from([
            "songart", "render", "-i", "song.mid", "-o", "art.png", "--mapping", "channel",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Render { mapping, json, .. } => {
                assert_eq!(parse_mapping(&mapping), InstrumentMapping::Channel);
                assert!(json);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_mapping() {
        let err = Cli::try_parse_from([
            "songart", "inspect", "-i", "song.mid", "--mapping", "program",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn test_cli_render_requires_output() {
        assert!(Cli::try_parse_from(["songart", "render", "-i", "song.mid"]).is_err());
    }

    #[test]
    fn test_cli_parses_notes_and_inspect() {
        let cli =
            Cli::try_parse_from(["songart", "notes", "-i", "song.mid", "-o", "notes.csv"]).unwrap();
        match cli.command {
            Commands::Notes { input, output, mapping } => {
                assert_eq!(input, "song.mid");
                assert_eq!(output, "notes.csv");
                assert_eq!(parse_mapping(&mapping), InstrumentMapping::CompactTrack);
            }
            _ => panic!("expected notes command"),
        }

        let cli = Cli::try_parse_from(["songart", "inspect", "-i", "notes.csv", "--json"]).unwrap();
        match cli.command {
            Commands::Inspect { input, json, .. } => {
                assert_eq!(input, "notes.csv");
                assert!(json);
            }
            _ => panic!("expected inspect command"),
        }
    }
}
