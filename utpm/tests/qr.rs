use approx::assert_abs_diff_eq;
use ndarray::Axis;

use utpm::generate::random_utpm;

/// S6: QR of a random `4x3` matrix as UTPM of degree 3; check
/// `dot(Q,R) == A` at every coefficient and `R` upper-triangular.
#[test]
fn s6_qr_reconstructs_and_is_upper_triangular_every_order() {
    let a = random_utpm(3, 1, 4, 3);
    let (q, r) = a.qr().unwrap();

    let reconstructed = q.dot(&r).unwrap();
    assert_abs_diff_eq!(reconstructed.coeffs(), a.coeffs(), epsilon = 1e-8);

    let (d, p, k, _) = r.dim();
    for deg in 0..d {
        for dir in 0..p {
            let slice = r.coeffs().index_axis(Axis(0), deg).index_axis(Axis(0), dir);
            for i in 0..k {
                for j in 0..i {
                    assert_abs_diff_eq!(slice[[i, j]], 0.0, epsilon = 1e-8);
                }
            }
        }
    }
}

#[test]
fn qr_columns_are_orthonormal() {
    let a = random_utpm(2, 1, 5, 3);
    let (q, _) = a.qr().unwrap();
    let qtq = q.transpose().dot(&q).unwrap();

    let identity = {
        let (d, p, n, _) = qtq.dim();
        let mut eye = ndarray::Array4::<f64>::zeros((d, p, n, n));
        for dir in 0..p {
            for i in 0..n {
                eye[[0, dir, i, i]] = 1.0;
            }
        }
        eye
    };
    assert_abs_diff_eq!(qtq.coeffs(), &identity, epsilon = 1e-8);
}

#[test]
fn qr_rejects_wide_matrices() {
    let a = random_utpm(1, 1, 2, 3);
    assert!(a.qr().is_err());
}
