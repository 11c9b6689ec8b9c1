//! Linear solve Taylor recurrence for `A . Y = X`, square `A`.
//!
//! Only a single right-hand-side column is supported, matching the
//! distilled source's own `assert M == 1` restriction; a wider `X`
//! returns the unsupported-operation error rather than a silent
//! column-batched solve.

use ndarray::Axis;

use dense_linalg::dense_solve;

use crate::error::{Result, UtpmError};
use crate::types::Coeffs;

pub fn solve(a: &Coeffs, x: &Coeffs) -> Result<Coeffs> {
    let (d, p, n, m) = x.dim();
    if m != 1 {
        return Err(UtpmError::Unsupported(
            "solve: only a single right-hand-side column is supported".into(),
        ));
    }
    let (ad, ap, an, am) = a.dim();
    if ad != d || ap != p || an != n || am != n {
        return Err(UtpmError::ShapeMismatch(format!(
            "solve: A is ({ad},{ap},{an},{am}), X is ({d},{p},{n},{m})"
        )));
    }

    let mut out = Coeffs::zeros((d, p, n, 1));
    for dir in 0..p {
        for deg in 0..d {
            let mut rhs = x
                .index_axis(Axis(0), deg)
                .index_axis(Axis(0), dir)
                .index_axis(Axis(1), 0)
                .to_owned();
            for k in 1..=deg {
                let ak = a.index_axis(Axis(0), k).index_axis(Axis(0), dir);
                let yk = out
                    .index_axis(Axis(0), deg - k)
                    .index_axis(Axis(0), dir)
                    .index_axis(Axis(1), 0);
                rhs -= &ak.dot(&yk);
            }
            let a0 = a.index_axis(Axis(0), 0).index_axis(Axis(0), dir);
            let y = dense_solve(a0, rhs.view())?;
            out.index_axis_mut(Axis(0), deg)
                .index_axis_mut(Axis(0), dir)
                .index_axis_mut(Axis(1), 0)
                .assign(&y);
        }
    }
    Ok(out)
}
