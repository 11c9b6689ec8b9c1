//! Overloaded entry points that choose between a plain-matrix path and a
//! UTPM path, and between the four (plain/Taylor) operand combinations a
//! binary operator can see.

use ndarray::Array2;

use crate::error::{Result, UtpmError};
use crate::value::Utpm;

/// Either a plain matrix or a UTPM-valued one.
#[derive(Debug, Clone)]
pub enum MatrixLike {
    Plain(Array2<f64>),
    Taylor(Utpm),
}

impl From<Array2<f64>> for MatrixLike {
    fn from(m: Array2<f64>) -> Self {
        MatrixLike::Plain(m)
    }
}

impl From<Utpm> for MatrixLike {
    fn from(u: Utpm) -> Self {
        MatrixLike::Taylor(u)
    }
}

impl MatrixLike {
    pub fn shape(&self) -> (usize, usize) {
        match self {
            MatrixLike::Plain(m) => m.dim(),
            MatrixLike::Taylor(u) => u.shape(),
        }
    }

    /// Lifts a plain matrix to a degenerate UTPM at the given `(D,P)`, or
    /// returns the UTPM unchanged.
    fn lift(&self, d: usize, p: usize) -> Utpm {
        match self {
            MatrixLike::Plain(m) => Utpm::constant(m.view(), d, p),
            MatrixLike::Taylor(u) => u.clone(),
        }
    }
}

fn taylor_shape(a: &MatrixLike, b: &MatrixLike) -> Result<(usize, usize)> {
    match (a, b) {
        (MatrixLike::Taylor(u), _) | (_, MatrixLike::Taylor(u)) => {
            let (d, p, _, _) = u.dim();
            Ok((d, p))
        }
        _ => Err(UtpmError::Usage(
            "taylor_shape: neither operand carries Taylor structure".into(),
        )),
    }
}

pub fn shape(a: &MatrixLike) -> (usize, usize) {
    a.shape()
}

pub fn dot(a: &MatrixLike, b: &MatrixLike) -> Result<MatrixLike> {
    match (a, b) {
        (MatrixLike::Plain(x), MatrixLike::Plain(y)) => Ok(MatrixLike::Plain(
            dense_linalg::dense_matmul(x.view(), y.view()),
        )),
        (MatrixLike::Taylor(x), MatrixLike::Taylor(y)) => Ok(MatrixLike::Taylor(x.dot(y)?)),
        _ => {
            let (d, p) = taylor_shape(a, b)?;
            Ok(MatrixLike::Taylor(a.lift(d, p).dot(&b.lift(d, p))?))
        }
    }
}

/// `solve(A, x)` restricted to a single right-hand-side column, mirroring
/// the restriction carried through `dense-linalg` and `raw::solve`.
pub fn solve(a: &MatrixLike, x: &MatrixLike) -> Result<MatrixLike> {
    match (a, x) {
        (MatrixLike::Plain(am), MatrixLike::Plain(xm)) => {
            if xm.ncols() != 1 {
                return Err(UtpmError::Unsupported(
                    "dispatch::solve: plain path only supports a single right-hand-side column"
                        .into(),
                ));
            }
            let b = xm.column(0).to_owned();
            let y = dense_linalg::dense_solve(am.view(), b.view())?;
            let n = y.len();
            let y2 = Array2::from_shape_vec((n, 1), y.to_vec())
                .map_err(|e| UtpmError::ShapeMismatch(e.to_string()))?;
            Ok(MatrixLike::Plain(y2))
        }
        (MatrixLike::Taylor(am), MatrixLike::Taylor(xm)) => Ok(MatrixLike::Taylor(am.solve(xm)?)),
        _ => {
            let (d, p) = taylor_shape(a, x)?;
            Ok(MatrixLike::Taylor(a.lift(d, p).solve(&x.lift(d, p))?))
        }
    }
}

pub fn inv(a: &MatrixLike) -> Result<MatrixLike> {
    match a {
        MatrixLike::Plain(x) => Ok(MatrixLike::Plain(dense_linalg::dense_inv(x.view())?)),
        MatrixLike::Taylor(x) => Ok(MatrixLike::Taylor(x.inv()?)),
    }
}

/// Trace of a plain matrix is returned as a `1x1` matrix, matching the
/// `()` trailing shape convention UTPM represents as `(1,1)`.
pub fn trace(a: &MatrixLike) -> Result<MatrixLike> {
    match a {
        MatrixLike::Plain(x) => {
            let t = dense_linalg::dense_trace(x.view())?;
            Ok(MatrixLike::Plain(Array2::from_elem((1, 1), t)))
        }
        MatrixLike::Taylor(x) => Ok(MatrixLike::Taylor(x.trace()?)),
    }
}

pub fn transpose(a: &MatrixLike) -> MatrixLike {
    match a {
        MatrixLike::Plain(x) => MatrixLike::Plain(dense_linalg::dense_transpose(x.view())),
        MatrixLike::Taylor(x) => MatrixLike::Taylor(x.transpose()),
    }
}

pub fn qr(a: &MatrixLike) -> Result<(MatrixLike, MatrixLike)> {
    match a {
        MatrixLike::Plain(x) => {
            let (q, r) = dense_linalg::dense_qr(x.view())?;
            Ok((MatrixLike::Plain(q), MatrixLike::Plain(r)))
        }
        MatrixLike::Taylor(x) => {
            let (q, r) = x.qr()?;
            Ok((MatrixLike::Taylor(q), MatrixLike::Taylor(r)))
        }
    }
}

pub fn eigh(a: &MatrixLike) -> Result<(MatrixLike, MatrixLike)> {
    match a {
        MatrixLike::Plain(x) => {
            let (vals, vecs) = dense_linalg::dense_eigh(x.view())?;
            let n = vals.len();
            let vals2 = Array2::from_shape_vec((n, 1), vals.to_vec())
                .map_err(|e| UtpmError::ShapeMismatch(e.to_string()))?;
            Ok((MatrixLike::Plain(vals2), MatrixLike::Plain(vecs)))
        }
        MatrixLike::Taylor(x) => {
            let (l, q) = x.eigh()?;
            Ok((MatrixLike::Taylor(l), MatrixLike::Taylor(q)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn dot_plain_plain_matches_dense_matmul() {
        let a = MatrixLike::Plain(array![[1.0, 2.0], [3.0, 4.0]]);
        let b = MatrixLike::Plain(array![[5.0, 6.0], [7.0, 8.0]]);
        let MatrixLike::Plain(c) = dot(&a, &b).unwrap() else {
            panic!("expected plain result");
        };
        assert_abs_diff_eq!(c[[0, 0]], 19.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c[[1, 1]], 50.0, epsilon = 1e-12);
    }

    #[test]
    fn dot_mixed_lifts_plain_operand() {
        let a = MatrixLike::Plain(array![[2.0, 0.0], [0.0, 2.0]]);
        let b = MatrixLike::Taylor(Utpm::constant(array![[1.0], [1.0]].view(), 2, 1));
        let MatrixLike::Taylor(c) = dot(&a, &b).unwrap() else {
            panic!("expected Taylor result");
        };
        assert_eq!(c.dim(), (2, 1, 2, 1));
    }
}
