use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("Unknown policy: {0} (expected uniform, red or linear)")]
    UnknownPolicy(String),
    #[error("Observation has length {actual}, expected {expected}")]
    ObservationLength { expected: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Failed to access checkpoint {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Checkpoint is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported checkpoint version {found} (this build reads {supported})")]
    UnsupportedVersion { found: u64, supported: u32 },
    #[error("Unknown policy kind in checkpoint: {0}")]
    UnknownKind(String),
    #[error("Checkpoint parameter shape mismatch: {0}")]
    ShapeMismatch(String),
}
