//! JSON output types for the `--json` flag.
//!
//! Each command prints exactly one document; failures are reported in the
//! `errors` array with a stable code instead of on stderr.

use serde::{Deserialize, Serialize};
use songart_core::{ArtError, GridStats};

/// Error codes for CLI operations.
pub mod error_codes {
    /// Input file could not be read or parsed
    pub const INPUT_LOAD: &str = "CLI_001";
    /// Unknown input file extension
    pub const UNKNOWN_EXTENSION: &str = "CLI_002";
    /// Layout file or flags could not be parsed
    pub const LAYOUT: &str = "CLI_003";
    /// Rendering failed (wraps pipeline errors)
    pub const RENDER: &str = "CLI_004";
    /// Writing the output file failed
    pub const OUTPUT_WRITE: &str = "CLI_005";
}

/// Warning codes for CLI operations.
pub mod warning_codes {
    /// Input loaded with dropped or unmatched notes
    pub const INPUT_WARNING: &str = "CLI_W001";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Pipeline error kind, for rendering failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// File involved (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            kind: None,
            file: None,
        }
    }

    /// Error for a failed render, tagged with the pipeline error kind.
    pub fn render(err: &ArtError) -> Self {
        Self {
            kind: Some(err.kind().to_string()),
            ..Self::new(error_codes::RENDER, err.to_string())
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    pub code: String,
    pub message: String,
}

impl JsonWarning {
    pub fn input(message: impl Into<String>) -> Self {
        Self {
            code: warning_codes::INPUT_WARNING.to_string(),
            message: message.into(),
        }
    }
}

/// Grid statistics as reported by `render` and `inspect`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridStatsJson {
    pub instrument_count: usize,
    pub tick_count: usize,
    pub cell_count: u64,
    pub min_pitch: i32,
    pub max_pitch: i32,
    pub logical_side: u64,
}

impl From<&GridStats> for GridStatsJson {
    fn from(stats: &GridStats) -> Self {
        Self {
            instrument_count: stats.instrument_count,
            tick_count: stats.tick_count,
            cell_count: stats.cell_count(),
            min_pitch: stats.min_pitch,
            max_pitch: stats.max_pitch,
            logical_side: stats.logical_side,
        }
    }
}

/// Details of a written image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageJson {
    pub path: String,
    pub side: u32,
    pub pixel_scale: u32,
    /// BLAKE3 hash of the PNG bytes
    pub hash: String,
}

/// Output of `render --json` and `inspect --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderOutput {
    pub success: bool,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<GridStatsJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageJson>,
    pub warnings: Vec<JsonWarning>,
    pub errors: Vec<JsonError>,
}

impl RenderOutput {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            success: false,
            input: input.into(),
            note_count: None,
            stats: None,
            image: None,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn fail(mut self, error: JsonError) -> Self {
        self.success = false;
        self.errors.push(error);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_carries_kind() {
        let error = JsonError::render(&ArtError::EmptyInput);
        assert_eq!(error.code, error_codes::RENDER);
        assert_eq!(error.kind.as_deref(), Some("empty_input"));

        let json = serde_json::to_value(&error).unwrap();
        assert!(json.get("file").is_none());
    }

    #[test]
    fn test_failed_output_shape() {
        let output = RenderOutput::new("song.mid")
            .fail(JsonError::new(error_codes::INPUT_LOAD, "boom").with_file("song.mid"));
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"][0]["code"], "CLI_001");
        assert!(json.get("stats").is_none());
    }
}
