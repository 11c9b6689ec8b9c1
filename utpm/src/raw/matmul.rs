//! Truncated Cauchy product using genuine matrix multiplication at each
//! Taylor order and direction: `z[d] = sum_{c=0..=d} x[c] . y[d-c]`.

use ndarray::Axis;

use dense_linalg::dense_matmul;

use crate::error::{Result, UtpmError};
use crate::types::Coeffs;

pub fn matmul(a: &Coeffs, b: &Coeffs) -> Result<Coeffs> {
    let (d, p, n, k1) = a.dim();
    let (d2, p2, k2, m) = b.dim();
    if d != d2 || p != p2 {
        return Err(UtpmError::ShapeMismatch(format!(
            "Taylor order/direction mismatch: ({d},{p}) vs ({d2},{p2})"
        )));
    }
    if k1 != k2 {
        return Err(UtpmError::ShapeMismatch(format!(
            "inner matrix dimensions disagree: {k1} vs {k2}"
        )));
    }

    let mut out = Coeffs::zeros((d, p, n, m));
    for deg in 0..d {
        for dir in 0..p {
            let mut acc = ndarray::Array2::<f64>::zeros((n, m));
            for c in 0..=deg {
                let lhs = a.index_axis(Axis(0), c).index_axis(Axis(0), dir);
                let rhs = b.index_axis(Axis(0), deg - c).index_axis(Axis(0), dir);
                acc += &dense_matmul(lhs, rhs);
            }
            out.index_axis_mut(Axis(0), deg)
                .index_axis_mut(Axis(0), dir)
                .assign(&acc);
        }
    }
    Ok(out)
}
