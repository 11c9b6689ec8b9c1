use approx::assert_abs_diff_eq;
use ndarray::array;

use dense_linalg::{dense_eigh, dense_matmul, dense_transpose};

#[test]
fn eigh_reconstructs_symmetric_matrix() {
    let a = array![[4.0, 1.0], [1.0, 3.0]];
    let (vals, vecs) = dense_eigh(a.view()).unwrap();

    assert!(vals[0] < vals[1]);

    let mut diag = ndarray::Array2::<f64>::zeros((2, 2));
    diag[[0, 0]] = vals[0];
    diag[[1, 1]] = vals[1];

    let reconstructed = dense_matmul(
        dense_matmul(vecs.view(), diag.view()).view(),
        dense_transpose(vecs.view()).view(),
    );
    assert_abs_diff_eq!(reconstructed, a, epsilon = 1e-9);
}
