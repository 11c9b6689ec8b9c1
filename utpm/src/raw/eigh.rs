//! Taylor recurrence for the symmetric eigendecomposition `A = Q . diag(L) . Qᵀ`.
//! Requires symmetric `A` and distinct eigenvalues at the base point.

use ndarray::{Array1, Array2, Axis};

use dense_linalg::dense_eigh;

use crate::error::{Result, UtpmError};
use crate::types::Coeffs;

const EIGENVALUE_GAP_TOLERANCE: f64 = 1e-10;
const SYMMETRY_TOLERANCE: f64 = 1e-10;

pub fn eigh(a: &Coeffs) -> Result<(Coeffs, Coeffs)> {
    let (d, p, n, m) = a.dim();
    if n != m {
        return Err(UtpmError::NotSquare { rows: n, cols: m });
    }

    let mut l = Coeffs::zeros((d, p, n, 1));
    let mut q = Coeffs::zeros((d, p, n, n));

    for dir in 0..p {
        let a0 = a.index_axis(Axis(0), 0).index_axis(Axis(0), dir);
        for i in 0..n {
            for j in (i + 1)..n {
                if (a0[[i, j]] - a0[[j, i]]).abs() > SYMMETRY_TOLERANCE {
                    return Err(UtpmError::PreconditionViolation(
                        "eigh requires a symmetric matrix at the base point".into(),
                    ));
                }
            }
        }
        let (l0, q0) = dense_eigh(a0)?;
        for i in 0..n {
            for j in (i + 1)..n {
                if (l0[j] - l0[i]).abs() < EIGENVALUE_GAP_TOLERANCE {
                    return Err(UtpmError::PreconditionViolation(
                        "eigh requires distinct eigenvalues at the base point".into(),
                    ));
                }
            }
        }
        for i in 0..n {
            l[[0, dir, i, 0]] = l0[i];
        }
        q.index_axis_mut(Axis(0), 0)
            .index_axis_mut(Axis(0), dir)
            .assign(&q0);

        // Off-diagonal mixing matrix built once from the base-point
        // eigenvalues and reused unchanged across every Taylor order.
        let mut h = Array2::<f64>::zeros((n, n));
        for r in 0..n {
            for c in 0..n {
                if r != c {
                    h[[r, c]] = 1.0 / (l0[c] - l0[r]);
                }
            }
        }

        for dk in 1..d {
            let mut d_f = Array2::<f64>::zeros((n, n));
            for ia in 0..dk {
                for ib in 0..dk {
                    for ic in 0..dk {
                        if ia + ib + ic == dk {
                            let qa = q.index_axis(Axis(0), ia).index_axis(Axis(0), dir);
                            let ab = a.index_axis(Axis(0), ib).index_axis(Axis(0), dir);
                            let qc = q.index_axis(Axis(0), ic).index_axis(Axis(0), dir);
                            d_f += &qa.t().dot(&ab).dot(&qc);
                        }
                    }
                }
            }

            let mut d_g = Array2::<f64>::zeros((n, n));
            for dd in 1..dk {
                let qd = q.index_axis(Axis(0), dd).index_axis(Axis(0), dir);
                let q_rest = q.index_axis(Axis(0), dk - dd).index_axis(Axis(0), dir);
                d_g += &qd.t().dot(&q_rest);
            }
            let s_mat = d_g.mapv(|v| -0.5 * v);

            let q0v = q.index_axis(Axis(0), 0).index_axis(Axis(0), dir);
            let adk = a.index_axis(Axis(0), dk).index_axis(Axis(0), dir);
            let l0_diag = diag_matrix(&l0);

            let mut k_mat = &d_f + &q0v.t().dot(&adk).dot(&q0v);
            k_mat = &k_mat + &s_mat.dot(&l0_diag) + &l0_diag.dot(&s_mat);

            let mut d_l = Array1::<f64>::zeros(n);
            for i in 0..n {
                d_l[i] = k_mat[[i, i]];
                l[[dk, dir, i, 0]] = d_l[i];
            }

            let mut k_off = k_mat.clone();
            for i in 0..n {
                k_off[[i, i]] -= d_l[i];
            }
            let q_dk = q0v.dot(&(&(&h * &k_off) + &s_mat));
            q.index_axis_mut(Axis(0), dk)
                .index_axis_mut(Axis(0), dir)
                .assign(&q_dk);
        }
    }

    Ok((l, q))
}

fn diag_matrix(v: &Array1<f64>) -> Array2<f64> {
    let n = v.len();
    let mut out = Array2::zeros((n, n));
    for i in 0..n {
        out[[i, i]] = v[i];
    }
    out
}
