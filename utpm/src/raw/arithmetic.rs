//! Elementwise Taylor arithmetic: addition, subtraction, elementwise
//! multiplication (truncated Cauchy product) and elementwise division.

use ndarray::Axis;

use crate::error::{Result, UtpmError};
use crate::types::Coeffs;

fn ensure_same_shape(a: &Coeffs, b: &Coeffs) -> Result<()> {
    if a.dim() != b.dim() {
        return Err(UtpmError::ShapeMismatch(format!(
            "{:?} vs {:?}",
            a.dim(),
            b.dim()
        )));
    }
    Ok(())
}

pub fn add(a: &Coeffs, b: &Coeffs) -> Result<Coeffs> {
    ensure_same_shape(a, b)?;
    Ok(a + b)
}

pub fn sub(a: &Coeffs, b: &Coeffs) -> Result<Coeffs> {
    ensure_same_shape(a, b)?;
    Ok(a - b)
}

pub fn neg(a: &Coeffs) -> Coeffs {
    -a
}

/// Adds a plain scalar to the `d=0` slice only, per the convention that a
/// scalar is a degree-0 constant in every direction.
pub fn add_scalar(a: &Coeffs, s: f64) -> Coeffs {
    let mut out = a.clone();
    for mut slice in out.axis_iter_mut(Axis(1)) {
        let mut base = slice.index_axis_mut(Axis(0), 0);
        base.mapv_inplace(|v| v + s);
    }
    out
}

pub fn mul_scalar(a: &Coeffs, s: f64) -> Coeffs {
    a * s
}

/// Divides every Taylor coefficient by the same scalar. Only correct when
/// `s` is a genuine constant, not itself a function of the Taylor
/// parameter; dividing by a Taylor-varying quantity requires
/// [`div_elementwise`] instead.
pub fn div_scalar(a: &Coeffs, s: f64) -> Coeffs {
    a / s
}

/// Truncated Cauchy product applied elementwise over the trailing `(N,M)`
/// grid: `z[d] = sum_{c=0..=d} x[c] * y[d-c]`, Hadamard product per term.
pub fn mul_elementwise(a: &Coeffs, b: &Coeffs) -> Result<Coeffs> {
    ensure_same_shape(a, b)?;
    let (d, p, n, m) = a.dim();
    let mut out = Coeffs::zeros((d, p, n, m));
    for deg in 0..d {
        for dir in 0..p {
            let mut acc = ndarray::Array2::<f64>::zeros((n, m));
            for c in 0..=deg {
                let xc = a.index_axis(Axis(0), c).index_axis(Axis(0), dir);
                let yc = b.index_axis(Axis(0), deg - c).index_axis(Axis(0), dir);
                acc += &(&xc * &yc);
            }
            out.index_axis_mut(Axis(0), deg)
                .index_axis_mut(Axis(0), dir)
                .assign(&acc);
        }
    }
    Ok(out)
}

/// Elementwise division `z = x / y`, requiring `y[0]` to be elementwise
/// non-zero. Solves the Cauchy-product recurrence for `z[d]` in terms of
/// previously computed `z[c], c < d`.
pub fn div_elementwise(a: &Coeffs, b: &Coeffs) -> Result<Coeffs> {
    ensure_same_shape(a, b)?;
    let (d, p, n, m) = a.dim();
    let mut out = Coeffs::zeros((d, p, n, m));
    for dir in 0..p {
        let b0 = b.index_axis(Axis(0), 0).index_axis(Axis(0), dir);
        if b0.iter().any(|v| v.abs() < f64::EPSILON) {
            return Err(UtpmError::Singular);
        }
        for deg in 0..d {
            let mut acc = a
                .index_axis(Axis(0), deg)
                .index_axis(Axis(0), dir)
                .to_owned();
            for c in 0..deg {
                let zc = out.index_axis(Axis(0), c).index_axis(Axis(0), dir);
                let yc = b.index_axis(Axis(0), deg - c).index_axis(Axis(0), dir);
                acc -= &(&zc * &yc);
            }
            let acc = &acc / &b0;
            out.index_axis_mut(Axis(0), deg)
                .index_axis_mut(Axis(0), dir)
                .assign(&acc);
        }
    }
    Ok(out)
}
