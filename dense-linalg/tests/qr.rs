use approx::assert_abs_diff_eq;
use ndarray::array;

use dense_linalg::{dense_matmul, dense_qr};

#[test]
fn qr_reconstructs_and_is_upper_triangular() {
    let a = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
    let (q, r) = dense_qr(a.view()).unwrap();

    let reconstructed = dense_matmul(q.view(), r.view());
    assert_abs_diff_eq!(reconstructed, a, epsilon = 1e-9);

    for i in 0..r.nrows() {
        for j in 0..i {
            assert_abs_diff_eq!(r[[i, j]], 0.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn qr_rejects_wide_matrices() {
    let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    assert!(dense_qr(a.view()).is_err());
}
