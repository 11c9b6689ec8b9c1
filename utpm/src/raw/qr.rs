//! Taylor recurrence for thin QR decomposition: `A` is `M x N`, `M >= N`,
//! `A[0]` full column rank. Produces `Q` (`M x N`) and `R` (`N x N`
//! upper-triangular).

use ndarray::{Array2, Axis};

use dense_linalg::{dense_inv, dense_qr};

use crate::error::{Result, UtpmError};
use crate::types::Coeffs;

pub fn qr(a: &Coeffs) -> Result<(Coeffs, Coeffs)> {
    let (d, p, n, k) = a.dim();
    if n < k {
        return Err(UtpmError::PreconditionViolation(
            "qr requires at least as many rows as columns".into(),
        ));
    }

    let mut q = Coeffs::zeros((d, p, n, k));
    let mut r = Coeffs::zeros((d, p, k, k));

    for dir in 0..p {
        let a0 = a.index_axis(Axis(0), 0).index_axis(Axis(0), dir);
        let (q0, r0) = dense_qr(a0)?;
        q.index_axis_mut(Axis(0), 0)
            .index_axis_mut(Axis(0), dir)
            .assign(&q0);
        r.index_axis_mut(Axis(0), 0)
            .index_axis_mut(Axis(0), dir)
            .assign(&r0);

        for dk in 1..d {
            let mut d_f = Array2::<f64>::zeros((n, k));
            let mut d_g = Array2::<f64>::zeros((k, k));
            for dd in 1..dk {
                let qd = q.index_axis(Axis(0), dd).index_axis(Axis(0), dir);
                let r_rest = r.index_axis(Axis(0), dk - dd).index_axis(Axis(0), dir);
                d_f += &qd.dot(&r_rest);

                let q_rest = q.index_axis(Axis(0), dk - dd).index_axis(Axis(0), dir);
                d_g += &qd.t().dot(&q_rest);
            }
            d_g.mapv_inplace(|v| -v);

            let ak = a.index_axis(Axis(0), dk).index_axis(Axis(0), dir);
            let h = &ak.to_owned() - &d_f;
            let s_mat = d_g.mapv(|v| -0.5 * v);

            let q0v = q.index_axis(Axis(0), 0).index_axis(Axis(0), dir);
            let r0v = r.index_axis(Axis(0), 0).index_axis(Axis(0), dir);
            let r0_inv = dense_inv(r0v)?;

            let mut x = q0v.t().dot(&h).dot(&r0_inv) - &s_mat;
            keep_strictly_lower(&mut x);
            let x = &x - &x.t();

            let k_mat = &s_mat + &x;

            let mut r_dk = q0v.t().dot(&h) - &k_mat.dot(&r0v);
            zero_strictly_lower(&mut r_dk);
            r.index_axis_mut(Axis(0), dk)
                .index_axis_mut(Axis(0), dir)
                .assign(&r_dk);

            let q_dk = (&h - &q0v.dot(&r_dk)).dot(&r0_inv);
            q.index_axis_mut(Axis(0), dk)
                .index_axis_mut(Axis(0), dir)
                .assign(&q_dk);
        }
    }

    Ok((q, r))
}

/// Zeroes everything except the strictly-lower triangle (`i > j`).
fn keep_strictly_lower(m: &mut Array2<f64>) {
    let (n, k) = m.dim();
    for i in 0..n {
        for j in 0..k {
            if i <= j {
                m[[i, j]] = 0.0;
            }
        }
    }
}

/// Zeroes the strictly-lower triangle (`i > j`), keeping the upper
/// triangle and diagonal.
fn zero_strictly_lower(m: &mut Array2<f64>) {
    let (n, k) = m.dim();
    for i in 0..n {
        for j in 0..k {
            if i > j {
                m[[i, j]] = 0.0;
            }
        }
    }
}
