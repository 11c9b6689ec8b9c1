//! Error type for the dense linear algebra collaborator.

use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("matrix is not square: rows={rows} cols={cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("matrix does not have full column rank")]
    RankDeficient,

    #[error(transparent)]
    Lapack(#[from] ndarray_linalg::error::LinalgError),
}
