//! SongArt End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the full pipeline:
//!
//! - Rendering: MIDI file or notes table -> PNG on disk
//! - MIDI loading: track/channel mapping and note pairing on synthetic files
//! - **Determinism**: byte-identical PNG output across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p songart-tests
//! ```
//!
//! ## Fixtures
//!
//! The `fixtures` module builds Standard MIDI Files from absolute-tick note
//! lists, so tests can describe songs without hand-computing delta times:
//!
//! ```rust,ignore
//! use songart_tests::fixtures::SmfBuilder;
//!
//! let bytes = SmfBuilder::new(96)
//!     .conductor_track()
//!     .track(|t| t.note(0, 60, 0, 8).note(0, 64, 8, 8))
//!     .to_bytes();
//! ```

pub mod determinism;
pub mod fixtures;
