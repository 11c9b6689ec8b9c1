use approx::assert_abs_diff_eq;
use ndarray::{array, Array1};

use dense_linalg::{dense_inv, dense_matmul, dense_solve};

#[test]
fn solve_matches_inverse() {
    let a = array![[4.0, 1.0], [2.0, 3.0]];
    let b = array![1.0, 2.0];
    let x = dense_solve(a.view(), b.view()).unwrap();

    let inv = dense_inv(a.view()).unwrap();
    let x_via_inv: Array1<f64> = dense_matmul(inv.view(), b.view().insert_axis(ndarray::Axis(1)))
        .column(0)
        .to_owned();

    assert_abs_diff_eq!(x, x_via_inv, epsilon = 1e-9);
}

#[test]
fn solve_rejects_non_square() {
    let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let b = array![1.0, 2.0];
    assert!(dense_solve(a.view(), b.view()).is_err());
}
