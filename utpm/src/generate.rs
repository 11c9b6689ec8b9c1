//! Random test-matrix generators, mirroring the dense-linalg teacher's own
//! `generate.rs` (`random`, `random_regular`, `random_hermite`) but built
//! on `rand`/`rand_distr` directly rather than a `Scalar` trait, and
//! extended with a UTPM-valued generator for property tests that need
//! Taylor structure, not just a base point.

use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::value::Utpm;

/// Generate an `n x m` matrix with iid standard-normal entries, using
/// [`rand::thread_rng`].
pub fn random_matrix(n: usize, m: usize) -> Array2<f64> {
    let mut rng = rand::thread_rng();
    random_matrix_using(n, m, &mut rng)
}

pub fn random_matrix_using<R: Rng + ?Sized>(n: usize, m: usize, rng: &mut R) -> Array2<f64> {
    Array2::from_shape_fn((n, m), |_| StandardNormal.sample(rng))
}

/// Generate a random `n x n` matrix guaranteed (with probability 1) to be
/// non-singular: diagonally dominant by construction.
pub fn random_regular(n: usize) -> Array2<f64> {
    let mut rng = rand::thread_rng();
    random_regular_using(n, &mut rng)
}

pub fn random_regular_using<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Array2<f64> {
    let mut a = random_matrix_using(n, n, rng);
    for i in 0..n {
        let off_diag_sum: f64 = (0..n).filter(|&j| j != i).map(|j| a[[i, j]].abs()).sum();
        a[[i, i]] = off_diag_sum + 1.0;
    }
    a
}

/// Generate a random symmetric `n x n` matrix with distinct eigenvalues
/// (with probability 1), suitable for `eigh`.
pub fn random_symmetric(n: usize) -> Array2<f64> {
    let mut rng = rand::thread_rng();
    random_symmetric_using(n, &mut rng)
}

pub fn random_symmetric_using<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Array2<f64> {
    let a = random_matrix_using(n, n, rng);
    let mut sym = &a + &a.t();
    for i in 0..n {
        sym[[i, i]] += i as f64 * 0.1;
    }
    sym
}

/// Generate a random UTPM of the given shape: a random base point plus
/// random higher-order coefficients in every direction.
pub fn random_utpm(d: usize, p: usize, n: usize, m: usize) -> Utpm {
    let mut rng = rand::thread_rng();
    let mut tc = ndarray::Array4::zeros((d, p, n, m));
    for deg in 0..d {
        for dir in 0..p {
            let slice = random_matrix_using(n, m, &mut rng);
            tc.index_axis_mut(ndarray::Axis(0), deg)
                .index_axis_mut(ndarray::Axis(0), dir)
                .assign(&slice);
        }
    }
    Utpm::from_coeffs(tc)
}

/// Like [`random_utpm`] but with a diagonally-dominant base point (`d=0`),
/// for UTPM operations that need an invertible base matrix (`inv`,
/// `solve`, `qr`).
pub fn random_regular_utpm(d: usize, p: usize, n: usize) -> Utpm {
    let mut rng = rand::thread_rng();
    let mut tc = ndarray::Array4::zeros((d, p, n, n));
    for dir in 0..p {
        let base = random_regular_using(n, &mut rng);
        tc.index_axis_mut(ndarray::Axis(0), 0)
            .index_axis_mut(ndarray::Axis(0), dir)
            .assign(&base);
    }
    for deg in 1..d {
        for dir in 0..p {
            let slice = random_matrix_using(n, n, &mut rng);
            tc.index_axis_mut(ndarray::Axis(0), deg)
                .index_axis_mut(ndarray::Axis(0), dir)
                .assign(&slice);
        }
    }
    Utpm::from_coeffs(tc)
}
