//! Detection error type.

/// Error returned by the detection entry points.
///
/// Structural probe failures are not errors — a probe that rejects its input
/// just hands the bytes to the next probe in the registry. Only two things
/// can fail a whole detection: nothing matched, or the byte source itself
/// failed mid-read.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DetectError {
    /// Every registered probe rejected the input, or the likely-formats
    /// constraint eliminated all candidates.
    #[error("unrecognized image format")]
    UnrecognizedFormat,

    /// The underlying reader failed.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}
