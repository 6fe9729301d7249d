//! Error types for geometric, kind-routing and configuration failures.

use thiserror::Error;

/// Invalid geometric operation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainError {
    /// Normalizing (or taking the direction of) a zero-length vector.
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
    /// World bounds must be finite and non-negative.
    #[error("invalid world bounds {width}x{height}")]
    InvalidBounds {
        /// Rejected width.
        width: f32,
        /// Rejected height.
        height: f32,
    },
}

/// Kind routing failure. Unreachable when spawning routes actors correctly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogicError {
    /// An actor was narrowed to a kind it does not have.
    #[error("expected kind {expected}, found {found}")]
    KindMismatch {
        /// Kind that was asked for.
        expected: &'static str,
        /// Kind the actor actually declares.
        found: &'static str,
    },
    /// A kind name that matches no known kind.
    #[error("unknown actor kind `{0}`")]
    UnknownKind(String),
}

/// Failure loading or saving simulation parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("params file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid params JSON.
    #[error("params parse error: {0}")]
    Serde(#[from] serde_json::Error),
}
