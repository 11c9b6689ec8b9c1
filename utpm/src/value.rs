//! The UTPM value type: a Taylor polynomial of matrices with operator
//! overloading dispatching onto [`crate::raw`].

use std::ops::{Add, Div, Mul, Neg, Sub};

use ndarray::{Array2, ArrayView2, Axis};

use crate::error::{Result, UtpmError};
use crate::raw;
use crate::types::Coeffs;

/// `D` Taylor coefficients, `P` independent directions, each an `N x M`
/// matrix. Owns its coefficient tensor exclusively.
#[derive(Debug, Clone)]
pub struct Utpm {
    tc: Coeffs,
}

impl Utpm {
    pub fn from_coeffs(tc: Coeffs) -> Self {
        Utpm { tc }
    }

    pub fn zeros(d: usize, p: usize, n: usize, m: usize) -> Self {
        Utpm {
            tc: Coeffs::zeros((d, p, n, m)),
        }
    }

    pub fn zeros_like(&self) -> Self {
        Utpm {
            tc: Coeffs::zeros(self.tc.dim()),
        }
    }

    /// Lifts a plain matrix into a degenerate UTPM: the given value at
    /// `d=0` in every direction, zero elsewhere.
    pub fn constant(value: ArrayView2<f64>, d: usize, p: usize) -> Self {
        let (n, m) = value.dim();
        let mut tc = Coeffs::zeros((d, p, n, m));
        for dir in 0..p {
            tc.index_axis_mut(Axis(1), dir)
                .index_axis_mut(Axis(0), 0)
                .assign(&value);
        }
        Utpm { tc }
    }

    pub fn coeffs(&self) -> &Coeffs {
        &self.tc
    }

    pub fn into_coeffs(self) -> Coeffs {
        self.tc
    }

    pub fn dim(&self) -> (usize, usize, usize, usize) {
        self.tc.dim()
    }

    pub fn order(&self) -> usize {
        self.tc.dim().0
    }

    pub fn directions(&self) -> usize {
        self.tc.dim().1
    }

    pub fn shape(&self) -> (usize, usize) {
        let (_, _, n, m) = self.tc.dim();
        (n, m)
    }

    pub fn base_point(&self, dir: usize) -> Array2<f64> {
        self.tc
            .index_axis(Axis(0), 0)
            .index_axis(Axis(0), dir)
            .to_owned()
    }

    pub fn coefficient(&self, deg: usize, dir: usize) -> Array2<f64> {
        self.tc
            .index_axis(Axis(0), deg)
            .index_axis(Axis(0), dir)
            .to_owned()
    }

    pub fn dot(&self, rhs: &Utpm) -> Result<Utpm> {
        Ok(Utpm::from_coeffs(raw::matmul::matmul(&self.tc, &rhs.tc)?))
    }

    pub fn inv(&self) -> Result<Utpm> {
        Ok(Utpm::from_coeffs(raw::inv::inv(&self.tc)?))
    }

    pub fn solve(&self, x: &Utpm) -> Result<Utpm> {
        Ok(Utpm::from_coeffs(raw::solve::solve(&self.tc, &x.tc)?))
    }

    pub fn qr(&self) -> Result<(Utpm, Utpm)> {
        let (q, r) = raw::qr::qr(&self.tc)?;
        Ok((Utpm::from_coeffs(q), Utpm::from_coeffs(r)))
    }

    pub fn eigh(&self) -> Result<(Utpm, Utpm)> {
        let (l, q) = raw::eigh::eigh(&self.tc)?;
        Ok((Utpm::from_coeffs(l), Utpm::from_coeffs(q)))
    }

    pub fn trace(&self) -> Result<Utpm> {
        Ok(Utpm::from_coeffs(raw::trace::trace(&self.tc)?))
    }

    pub fn transpose(&self) -> Utpm {
        Utpm::from_coeffs(raw::transpose::transpose(&self.tc))
    }

    pub fn reshape(&self, n: usize, m: usize) -> Result<Utpm> {
        let (d, p, n0, m0) = self.tc.dim();
        if n0 * m0 != n * m {
            return Err(UtpmError::ShapeMismatch(format!(
                "reshape: {n0}x{m0} has {} elements, target {n}x{m} has {}",
                n0 * m0,
                n * m
            )));
        }
        let mut out = Coeffs::zeros((d, p, n, m));
        for deg in 0..d {
            for dir in 0..p {
                let flat: Vec<f64> = self
                    .tc
                    .index_axis(Axis(0), deg)
                    .index_axis(Axis(0), dir)
                    .iter()
                    .copied()
                    .collect();
                let reshaped = Array2::from_shape_vec((n, m), flat)
                    .map_err(|e| UtpmError::ShapeMismatch(e.to_string()))?;
                out.index_axis_mut(Axis(0), deg)
                    .index_axis_mut(Axis(0), dir)
                    .assign(&reshaped);
            }
        }
        Ok(Utpm::from_coeffs(out))
    }

    /// Builds an `N x N` diagonal UTPM from an `N x 1` vector UTPM, the
    /// counterpart to the eigenvalue vector `eigh` returns.
    pub fn diag(&self) -> Result<Utpm> {
        let (d, p, n, m) = self.tc.dim();
        if m != 1 {
            return Err(UtpmError::ShapeMismatch(
                "diag: expected an N x 1 vector UTPM".into(),
            ));
        }
        let mut out = Coeffs::zeros((d, p, n, n));
        for deg in 0..d {
            for dir in 0..p {
                for i in 0..n {
                    out[[deg, dir, i, i]] = self.tc[[deg, dir, i, 0]];
                }
            }
        }
        Ok(Utpm::from_coeffs(out))
    }
}

macro_rules! impl_fallible_binop {
    ($trait:ident, $method:ident, $raw_fn:path) => {
        impl $trait<&Utpm> for &Utpm {
            type Output = Result<Utpm>;
            fn $method(self, rhs: &Utpm) -> Result<Utpm> {
                Ok(Utpm::from_coeffs($raw_fn(&self.tc, &rhs.tc)?))
            }
        }
        impl $trait<Utpm> for Utpm {
            type Output = Result<Utpm>;
            fn $method(self, rhs: Utpm) -> Result<Utpm> {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_fallible_binop!(Add, add, raw::arithmetic::add);
impl_fallible_binop!(Sub, sub, raw::arithmetic::sub);
impl_fallible_binop!(Mul, mul, raw::arithmetic::mul_elementwise);
impl_fallible_binop!(Div, div, raw::arithmetic::div_elementwise);

impl Neg for &Utpm {
    type Output = Utpm;
    fn neg(self) -> Utpm {
        Utpm::from_coeffs(raw::arithmetic::neg(&self.tc))
    }
}

impl Neg for Utpm {
    type Output = Utpm;
    fn neg(self) -> Utpm {
        -(&self)
    }
}

impl Mul<f64> for &Utpm {
    type Output = Utpm;
    fn mul(self, rhs: f64) -> Utpm {
        Utpm::from_coeffs(raw::arithmetic::mul_scalar(&self.tc, rhs))
    }
}

impl Add<f64> for &Utpm {
    type Output = Utpm;
    fn add(self, rhs: f64) -> Utpm {
        Utpm::from_coeffs(raw::arithmetic::add_scalar(&self.tc, rhs))
    }
}

/// Divides every Taylor coefficient by `rhs`. Only the correct adjoint
/// behavior when `rhs` is a genuine constant, not itself Taylor-varying
/// (see SPEC_FULL.md §9, open question 3); dividing by a UTPM-valued
/// quantity must go through `Div<&Utpm>` (`div_elementwise`) instead.
impl Div<f64> for &Utpm {
    type Output = Utpm;
    fn div(self, rhs: f64) -> Utpm {
        Utpm::from_coeffs(raw::arithmetic::div_scalar(&self.tc, rhs))
    }
}
