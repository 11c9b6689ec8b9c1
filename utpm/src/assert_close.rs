//! Tolerance-based comparison of `Utpm` values, mirroring the teacher's
//! `assert.rs` (`close_l2`, `close_max`) but comparing order-by-order
//! across every `(d,p)` coefficient slice instead of a single matrix.

use ndarray::Axis;

use crate::value::Utpm;

/// Largest absolute difference between any two matching coefficients of
/// `test` and `truth`.
pub fn max_abs_diff(test: &Utpm, truth: &Utpm) -> f64 {
    let diff = test.coeffs() - truth.coeffs();
    diff.iter().fold(0.0_f64, |acc, &v| acc.max(v.abs()))
}

/// Per-order maximum absolute difference, `result[d]` covering every
/// direction and element at Taylor order `d`. Useful when a property only
/// needs to hold up to a given order.
pub fn max_abs_diff_by_order(test: &Utpm, truth: &Utpm) -> Vec<f64> {
    let (d, _, _, _) = test.dim();
    (0..d)
        .map(|deg| {
            let a = test.coeffs().index_axis(Axis(0), deg);
            let b = truth.coeffs().index_axis(Axis(0), deg);
            let diff = &a - &b;
            diff.iter().fold(0.0_f64, |acc, &v| acc.max(v.abs()))
        })
        .collect()
}

/// Asserts that `test` and `truth` agree within `atol` at every Taylor
/// coefficient of every direction.
pub fn close_max(test: &Utpm, truth: &Utpm, atol: f64) -> Result<f64, f64> {
    let tol = max_abs_diff(test, truth);
    if tol < atol {
        Ok(tol)
    } else {
        Err(tol)
    }
}

/// Like [`close_max`] but relative to `truth`'s L2 norm, matching the
/// teacher's `close_l2`.
pub fn close_l2(test: &Utpm, truth: &Utpm, rtol: f64) -> Result<f64, f64> {
    let diff = test.coeffs() - truth.coeffs();
    let num = diff.iter().map(|&v| v * v).sum::<f64>().sqrt();
    let den = truth.coeffs().iter().map(|&v| v * v).sum::<f64>().sqrt();
    let tol = if den > 0.0 { num / den } else { num };
    if tol < rtol {
        Ok(tol)
    } else {
        Err(tol)
    }
}

#[macro_export]
macro_rules! assert_close_max {
    ($test:expr, $truth:expr, $tol:expr) => {
        $crate::assert_close::close_max($test, $truth, $tol).unwrap()
    };
    ($test:expr, $truth:expr, $tol:expr; $comment:expr) => {
        $crate::assert_close::close_max($test, $truth, $tol).expect($comment)
    };
}

#[macro_export]
macro_rules! assert_close_l2 {
    ($test:expr, $truth:expr, $tol:expr) => {
        $crate::assert_close::close_l2($test, $truth, $tol).unwrap()
    };
    ($test:expr, $truth:expr, $tol:expr; $comment:expr) => {
        $crate::assert_close::close_l2($test, $truth, $tol).expect($comment)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Utpm;
    use ndarray::array;

    #[test]
    fn identical_utpms_are_close() {
        let a = Utpm::constant(array![[1.0, 2.0], [3.0, 4.0]].view(), 2, 1);
        assert!(close_max(&a, &a, 1e-12).is_ok());
        assert!(close_l2(&a, &a, 1e-12).is_ok());
    }

    #[test]
    fn differing_utpms_fail_tight_tolerance() {
        let a = Utpm::constant(array![[1.0, 2.0], [3.0, 4.0]].view(), 1, 1);
        let b = Utpm::constant(array![[1.0, 2.0], [3.0, 4.5]].view(), 1, 1);
        assert!(close_max(&a, &b, 1e-6).is_err());
    }
}
