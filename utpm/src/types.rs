//! The coefficient tensor representation shared by every module in this crate.

use ndarray::Array4;

/// Raw `(D, P, N, M)` coefficient tensor: `D` Taylor coefficients, `P`
/// independent directions, each an `N x M` matrix.
pub type Coeffs = Array4<f64>;

/// The four axis lengths of a [`Coeffs`] tensor, named for readability at
/// call sites instead of a bare `(usize, usize, usize, usize)` tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub d: usize,
    pub p: usize,
    pub n: usize,
    pub m: usize,
}

impl Shape {
    pub fn of(t: &Coeffs) -> Self {
        let (d, p, n, m) = t.dim();
        Shape { d, p, n, m }
    }
}
