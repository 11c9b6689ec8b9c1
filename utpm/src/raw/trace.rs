//! Coefficient-wise scalar trace; result has trailing shape `(1,1)`.

use ndarray::Axis;

use dense_linalg::dense_trace;

use crate::error::Result;
use crate::types::Coeffs;

pub fn trace(a: &Coeffs) -> Result<Coeffs> {
    let (d, p, _, _) = a.dim();
    let mut out = Coeffs::zeros((d, p, 1, 1));
    for deg in 0..d {
        for dir in 0..p {
            let slice = a.index_axis(Axis(0), deg).index_axis(Axis(0), dir);
            out[[deg, dir, 0, 0]] = dense_trace(slice)?;
        }
    }
    Ok(out)
}
