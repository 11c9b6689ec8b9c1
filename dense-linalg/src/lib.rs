//! Dense matrix primitives with no notion of a Taylor dimension: solve,
//! inverse, QR, symmetric eigendecomposition, matmul, trace, transpose.
//!
//! This crate is the thin collaborator `utpm` calls at a UTPM's base-point
//! slice (`d = 0`). It wraps [`ndarray-linalg`](https://docs.rs/ndarray-linalg)
//! rather than LAPACK directly, so the matrix kernels themselves are never
//! reimplemented here.

pub mod error;

pub use error::{Error, Result};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use ndarray_linalg::{EighInto, Inverse, QRInto, Solve, Trace, UPLO};

pub fn dense_matmul(a: ArrayView2<f64>, b: ArrayView2<f64>) -> Array2<f64> {
    a.dot(&b)
}

pub fn dense_transpose(a: ArrayView2<f64>) -> Array2<f64> {
    a.t().to_owned()
}

pub fn dense_trace(a: ArrayView2<f64>) -> Result<f64> {
    let (n, m) = a.dim();
    if n != m {
        return Err(Error::NotSquare { rows: n, cols: m });
    }
    Ok(a.trace()?)
}

pub fn dense_inv(a: ArrayView2<f64>) -> Result<Array2<f64>> {
    let (n, m) = a.dim();
    if n != m {
        return Err(Error::NotSquare { rows: n, cols: m });
    }
    Ok(a.to_owned().inv()?)
}

/// Solves `A x = b` for a single right-hand-side vector. The engine never
/// needs a multi-column dense solve: UTPM-level `solve` with more than one
/// right-hand-side column is rejected upstream (see `utpm::raw::solve`).
pub fn dense_solve(a: ArrayView2<f64>, b: ArrayView1<f64>) -> Result<Array1<f64>> {
    let (n, m) = a.dim();
    if n != m {
        return Err(Error::NotSquare { rows: n, cols: m });
    }
    if b.len() != n {
        return Err(Error::ShapeMismatch(format!(
            "solve: {n}x{n} matrix against a length-{} right-hand side",
            b.len()
        )));
    }
    Ok(a.solve(&b.to_owned())?)
}

/// Thin QR factorization: `A` is `M x N` with `M >= N`, returns `(Q, R)`
/// with `Q` `M x N` and `R` `N x N`.
pub fn dense_qr(a: ArrayView2<f64>) -> Result<(Array2<f64>, Array2<f64>)> {
    let (rows, cols) = a.dim();
    if rows < cols {
        return Err(Error::RankDeficient);
    }
    let (q, r) = a.to_owned().qr_into()?;
    Ok((q, r))
}

/// Symmetric eigendecomposition, eigenvalues ascending. Only the lower
/// triangle of `a` is read.
pub fn dense_eigh(a: ArrayView2<f64>) -> Result<(Array1<f64>, Array2<f64>)> {
    let (n, m) = a.dim();
    if n != m {
        return Err(Error::NotSquare { rows: n, cols: m });
    }
    let (vals, vecs) = a.to_owned().eigh_into(UPLO::Lower)?;
    Ok((vals, vecs))
}
