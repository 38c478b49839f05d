use thiserror::Error;

use crate::mesh::{LineId, PointId, TriangleId};

/// Top-level error type for the mesh data crate.
#[derive(Debug, Error)]
pub enum MeshDataError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Errors raised by strict mutations on the entity store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("point id {0} is out of range")]
    PointNotFound(PointId),

    #[error("line id {0} is out of range")]
    LineNotFound(LineId),

    #[error("triangle id {0} is out of range")]
    TriangleNotFound(TriangleId),

    #[error("no {0} ids left")]
    IdsExhausted(&'static str),
}

/// Errors related to mesh operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised at the serialization boundary.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid vector string: {0:?}")]
    InvalidVector(String),

    #[error("invalid color string: {0:?}")]
    InvalidColor(String),

    #[error("invalid {kind} record: {value:?}")]
    InvalidRecord { kind: &'static str, value: String },

    #[error("invalid {kind} count: {count}")]
    InvalidCount { kind: &'static str, count: i64 },

    #[error("unexpected end of input at byte {position}")]
    UnexpectedEof { position: usize },

    #[error("{kind} count {count} does not fit the binary format")]
    TooManyRecords { kind: &'static str, count: usize },

    #[error("file not found: {path}")]
    FileNotFound { path: std::path::PathBuf },

    #[error("rejected record: {0}")]
    Rejected(#[from] MeshError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl FormatError {
    pub(crate) fn record(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidRecord {
            kind,
            value: value.into(),
        }
    }
}

/// Convenience type alias for results using [`MeshDataError`].
pub type Result<T> = std::result::Result<T, MeshDataError>;
