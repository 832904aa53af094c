//! Error types for the simulation pipeline
//!
//! Configuration and corpus problems are caught at construction; per-sample
//! failures (bad index, degenerate respiration segment) are reported
//! synchronously from `sample`.

use thiserror::Error;

/// Errors produced by corpus construction, configuration validation,
/// and per-sample simulation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// A configuration parameter is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Corpus dimensions do not match the supplied data length,
    /// or the two corpora are inconsistent with the configuration.
    #[error("corpus mismatch: {0}")]
    CorpusMismatch(String),

    /// Requested sample index is outside `[0, len)`.
    #[error("sample index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A computed respiration time index fell outside the recording.
    #[error("respiration index {index} out of bounds (subject has {len} samples)")]
    SegmentOutOfBounds { index: usize, len: usize },

    /// The drawn respiration segment is entirely zero, so the amplitude
    /// rescale has no finite solution.
    #[error("degenerate respiration segment: all {len} samples of subject {subject} are zero in the drawn window")]
    DegenerateSignal { subject: usize, len: usize },
}
