//! Matrix inverse Taylor recurrence.

use ndarray::{Array2, Axis};

use dense_linalg::dense_inv;

use crate::error::Result;
use crate::types::Coeffs;

pub fn inv(a: &Coeffs) -> Result<Coeffs> {
    let (d, p, n, m) = a.dim();
    let mut out = Coeffs::zeros((d, p, n, m));

    for dir in 0..p {
        let a0 = a.index_axis(Axis(0), 0).index_axis(Axis(0), dir);
        let b0 = dense_inv(a0)?;
        out.index_axis_mut(Axis(0), 0)
            .index_axis_mut(Axis(0), dir)
            .assign(&b0);

        for deg in 1..d {
            let mut acc = Array2::<f64>::zeros((n, m));
            for c in 1..=deg {
                let ac = a.index_axis(Axis(0), c).index_axis(Axis(0), dir);
                let bdc = out.index_axis(Axis(0), deg - c).index_axis(Axis(0), dir);
                acc += &ac.dot(&bdc);
            }
            let bd = -(b0.dot(&acc));
            out.index_axis_mut(Axis(0), deg)
                .index_axis_mut(Axis(0), dir)
                .assign(&bd);
        }
    }
    Ok(out)
}
