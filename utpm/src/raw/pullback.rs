//! Local pullback rules (reverse-mode adjoints) for each primitive
//! operation. Each rule is itself expressed using the UTPM-level
//! `arithmetic`/`matmul`/`transpose`/`inv`/`solve` kernels, so a pullback
//! chain differentiates derivatives, not just base points.

use ndarray::{Array2, Axis};

use crate::error::Result;
use crate::raw::{arithmetic, inv as raw_inv, matmul, solve as raw_solve, transpose};
use crate::types::Coeffs;

pub fn add_pullback(ybar: &Coeffs) -> (Coeffs, Coeffs) {
    (ybar.clone(), ybar.clone())
}

pub fn sub_pullback(ybar: &Coeffs) -> (Coeffs, Coeffs) {
    (ybar.clone(), arithmetic::neg(ybar))
}

/// `x̄₁ += ȳ·x₂`; `x̄₂ += ȳ·x₁` (elementwise).
pub fn mul_pullback(ybar: &Coeffs, x1: &Coeffs, x2: &Coeffs) -> Result<(Coeffs, Coeffs)> {
    let g1 = arithmetic::mul_elementwise(ybar, x2)?;
    let g2 = arithmetic::mul_elementwise(ybar, x1)?;
    Ok((g1, g2))
}

/// `x̄₁ += ȳ/x₂`; `x̄₂ -= ȳ·x₁/x₂²` (elementwise).
pub fn div_pullback(ybar: &Coeffs, x1: &Coeffs, x2: &Coeffs) -> Result<(Coeffs, Coeffs)> {
    let g1 = arithmetic::div_elementwise(ybar, x2)?;

    let x2_sq = arithmetic::mul_elementwise(x2, x2)?;
    let ybar_x1 = arithmetic::mul_elementwise(ybar, x1)?;
    let g2 = arithmetic::div_elementwise(&ybar_x1, &x2_sq)?;

    Ok((g1, arithmetic::neg(&g2)))
}

/// Textbook `dot` pullback: `x̄₁ += ȳ·x₂ᵀ`; `x̄₂ += x₁ᵀ·ȳ`.
pub fn dot_pullback(ybar: &Coeffs, x1: &Coeffs, x2: &Coeffs) -> Result<(Coeffs, Coeffs)> {
    let x2_t = transpose::transpose(x2);
    let g1 = matmul::matmul(ybar, &x2_t)?;

    let x1_t = transpose::transpose(x1);
    let g2 = matmul::matmul(&x1_t, ybar)?;

    Ok((g1, g2))
}

/// `x̄ += ȳ·I`, broadcasting the scalar `ȳ` along the diagonal of an
/// `n x n` adjoint.
pub fn trace_pullback(ybar: &Coeffs, n: usize) -> Coeffs {
    let (d, p, _, _) = ybar.dim();
    let mut out = Coeffs::zeros((d, p, n, n));
    for deg in 0..d {
        for dir in 0..p {
            let v = ybar[[deg, dir, 0, 0]];
            for i in 0..n {
                out[[deg, dir, i, i]] = v;
            }
        }
    }
    out
}

/// `x̄ -= yᵀ · ȳ · yᵀ`, where `y = inv(x)`.
pub fn inv_pullback(ybar: &Coeffs, y: &Coeffs) -> Result<Coeffs> {
    let y_t = transpose::transpose(y);
    let tmp = matmul::matmul(&y_t, ybar)?;
    let tmp2 = matmul::matmul(&tmp, &y_t)?;
    Ok(arithmetic::neg(&tmp2))
}

/// `x̄ += ȳᵀ`.
pub fn transpose_pullback(ybar: &Coeffs) -> Coeffs {
    transpose::transpose(ybar)
}

/// `A . y = x`: `x̄ += solve(Aᵀ, ȳ)`; `Ā += -solve(Aᵀ, ȳ)·yᵀ`.
pub fn solve_pullback(ybar: &Coeffs, a: &Coeffs, y: &Coeffs) -> Result<(Coeffs, Coeffs)> {
    let a_t = transpose::transpose(a);
    let z = raw_solve::solve(&a_t, ybar)?;

    let y_t = transpose::transpose(y);
    let a_bar = matmul::matmul(&z, &y_t)?;

    Ok((z, arithmetic::neg(&a_bar)))
}

/// Zeroes everything except the strictly-lower triangle (`i > j`) of
/// every `(d,p)` slice.
fn keep_strictly_lower(v: &Coeffs) -> Coeffs {
    let (d, p, n, m) = v.dim();
    let mut out = v.clone();
    for deg in 0..d {
        for dir in 0..p {
            let mut slice = out
                .index_axis_mut(Axis(0), deg)
                .index_axis_mut(Axis(0), dir);
            for i in 0..n {
                for j in 0..m {
                    if i <= j {
                        slice[[i, j]] = 0.0;
                    }
                }
            }
        }
    }
    out
}

/// QR pullback for `M >= N` (see the derivation in SPEC_FULL.md §4.2).
pub fn qr_pullback(qbar: &Coeffs, rbar: &Coeffs, q: &Coeffs, r: &Coeffs) -> Result<Coeffs> {
    let (_, _, m_rows, k) = q.dim();

    let r_inv = raw_inv::inv(r)?;
    let r_inv_t = transpose::transpose(&r_inv);

    let qbar_t = transpose::transpose(qbar);
    let qtq_bar = matmul::matmul(&qbar_t, q)?;

    let rbar_t = transpose::transpose(rbar);
    let r_rbar_t = matmul::matmul(r, &rbar_t)?;

    let v = arithmetic::sub(&qtq_bar, &r_rbar_t)?;
    let v_t = transpose::transpose(&v);
    let vt_minus_v = arithmetic::sub(&v_t, &v)?;
    let w = keep_strictly_lower(&vt_minus_v);

    let w_rinvt = matmul::matmul(&w, &r_inv_t)?;
    let inner = arithmetic::add(rbar, &w_rinvt)?;
    let mut abar = matmul::matmul(q, &inner)?;

    if m_rows > k {
        let q_t = transpose::transpose(q);
        let qtqbar = matmul::matmul(&q_t, qbar)?;
        let q_qtqbar = matmul::matmul(q, &qtqbar)?;
        let resid = arithmetic::sub(qbar, &q_qtqbar)?;
        let extra = matmul::matmul(&resid, &r_inv_t)?;
        abar = arithmetic::add(&abar, &extra)?;
    }

    Ok(abar)
}

/// Symmetric-eigh pullback: `Ā += Q · (diag(L̄) + H ⊙ (Qᵀ·Q̄)) · Qᵀ`, using
/// the same base-point-only `H` the forward recurrence builds.
pub fn eigh_pullback(lbar: &Coeffs, qbar: &Coeffs, l: &Coeffs, q: &Coeffs) -> Result<Coeffs> {
    let (d, p, n, _) = q.dim();

    let q_t = transpose::transpose(q);
    let qtqbar = matmul::matmul(&q_t, qbar)?;

    let mut middle = Coeffs::zeros((d, p, n, n));
    for dir in 0..p {
        let l0 = l.index_axis(Axis(0), 0).index_axis(Axis(0), dir);
        let mut h = Array2::<f64>::zeros((n, n));
        for r in 0..n {
            for c in 0..n {
                if r != c {
                    h[[r, c]] = 1.0 / (l0[[c, 0]] - l0[[r, 0]]);
                }
            }
        }
        for deg in 0..d {
            let qtqbar_slice = qtqbar.index_axis(Axis(0), deg).index_axis(Axis(0), dir);
            let mut m = &h * &qtqbar_slice;
            for i in 0..n {
                m[[i, i]] += lbar[[deg, dir, i, 0]];
            }
            middle
                .index_axis_mut(Axis(0), deg)
                .index_axis_mut(Axis(0), dir)
                .assign(&m);
        }
    }

    let q_middle = matmul::matmul(q, &middle)?;
    matmul::matmul(&q_middle, &q_t)
}
