//! Repeat-and-compare helpers for byte-identical output.
//!
//! ```rust,ignore
//! use songart_tests::determinism::verify_determinism;
//!
//! let result = verify_determinism(|| render_png(&notes), 3);
//! result.assert_deterministic();
//! ```

use std::fmt;

/// First byte where a repeated run disagreed with the first run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Which run (0-indexed) disagreed.
    pub run_index: usize,
    pub offset: usize,
    /// `None` when the run ended before `offset`.
    pub expected: Option<u8>,
    pub actual: Option<u8>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |b: Option<u8>| b.map_or_else(|| "EOF".to_string(), |b| format!("0x{:02X}", b));
        write!(
            f,
            "run {} differs at byte {}: expected {}, got {}",
            self.run_index,
            self.offset,
            show(self.expected),
            show(self.actual)
        )
    }
}

/// Outcome of [`verify_determinism`].
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    pub runs: usize,
    /// Size of the first run's output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    pub mismatch: Option<Mismatch>,
}

impl DeterminismResult {
    pub fn is_deterministic(&self) -> bool {
        self.mismatch.is_none()
    }

    /// Panic with the first mismatch if any run differed.
    pub fn assert_deterministic(&self) {
        if let Some(mismatch) = &self.mismatch {
            panic!(
                "Non-deterministic output detected!\nRuns: {}\nOutput size: {} bytes\nHash: {}\n{}",
                self.runs, self.output_size, self.hash, mismatch
            );
        }
    }
}

/// Run `generate_fn` `runs` times and compare every output with the first.
pub fn verify_determinism<F, O>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> O,
    O: AsRef<[u8]>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let reference = reference.as_ref();
    let mut result = DeterminismResult {
        runs,
        output_size: reference.len(),
        hash: blake3::hash(reference).to_hex().to_string(),
        mismatch: None,
    };

    for run_index in 1..runs {
        let output = generate_fn();
        if let Some(offset) = first_difference(reference, output.as_ref()) {
            result.mismatch = Some(Mismatch {
                run_index,
                offset,
                expected: reference.get(offset).copied(),
                actual: output.as_ref().get(offset).copied(),
            });
            break;
        }
    }

    result
}

fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_identical_runs() {
        let result = verify_determinism(|| vec![1u8, 2, 3], 3);
        assert!(result.is_deterministic());
        assert_eq!(result.output_size, 3);
        assert_eq!(result.hash.len(), 64);
    }

    #[test]
    fn test_reports_first_difference() {
        let calls = Cell::new(0u8);
        let result = verify_determinism(
            || {
                calls.set(calls.get() + 1);
                vec![0u8, calls.get()]
            },
            2,
        );
        assert_eq!(
            result.mismatch,
            Some(Mismatch {
                run_index: 1,
                offset: 1,
                expected: Some(1),
                actual: Some(2),
            })
        );
    }

    #[test]
    fn test_length_difference() {
        let calls = Cell::new(0usize);
        let result = verify_determinism(
            || {
                calls.set(calls.get() + 1);
                vec![7u8; calls.get()]
            },
            2,
        );
        let mismatch = result.mismatch.unwrap();
        assert_eq!(mismatch.offset, 1);
        assert_eq!(mismatch.expected, None);
        assert_eq!(mismatch.actual, Some(7));
    }
}
