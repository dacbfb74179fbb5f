//! SongArt CLI library.
//!
//! Input loading, layout resolution and the `render`, `notes` and `inspect`
//! command implementations used by the `songart` binary.

pub mod commands;
pub mod input;
pub mod layout;
