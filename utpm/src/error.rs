//! Error type for the UTPM engine, matching the conditions enumerated in
//! the error-handling design: shape mismatch, singularity, precondition
//! violation, usage error, unsupported.

use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, UtpmError>;

#[derive(Debug, Error)]
pub enum UtpmError {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("matrix is not square: rows={rows} cols={cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("singular matrix or denominator at the base point")]
    Singular,

    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("usage error: {0}")]
    Usage(String),

    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Dense(#[from] dense_linalg::Error),
}
