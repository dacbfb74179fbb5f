//! SongArt core pipeline.
//!
//! Turns a list of timed note events into a deterministic square image:
//! pitch becomes intensity, instrument and time become position.
//!
//! ```text
//! NoteEvent[] --grid::build--> IntensityGrid --canvas::map--> ColorBuffer --png--> bytes
//! ```
//!
//! # Example
//!
//! ```
//! use songart_core::{render, LayoutConfig, NoteEvent, Rgb};
//!
//! let events = vec![
//!     NoteEvent::new(0, 0, 60, 2).unwrap(),
//!     NoteEvent::new(1, 0, 72, 2).unwrap(),
//! ];
//! let rendering = render(&events, &LayoutConfig::default()).unwrap();
//! assert_eq!(rendering.canvas.side(), 2);
//! assert_eq!(rendering.canvas.get(0, 1), Rgb::new(255, 255, 0));
//! ```
//!
//! # Determinism
//!
//! Every stage is a pure function of its inputs. The PNG writer uses fixed
//! encoder settings, so equal canvases produce byte-identical files and
//! BLAKE3 hashes.

pub mod canvas;
pub mod config;
pub mod error;
pub mod grid;
pub mod note;
pub mod png;
pub mod render;

// Re-export main types for convenience
pub use canvas::{map, ColorBuffer, Rgb};
pub use config::{ChannelWeights, LayoutConfig};
pub use error::ArtError;
pub use grid::{build, IntensityGrid};
pub use note::NoteEvent;
pub use crate::png::{PngConfig, PngError};
pub use render::{inspect, render, GridStats, Rendering};
