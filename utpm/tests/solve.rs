use approx::assert_abs_diff_eq;

use utpm::generate::{random_regular_utpm, random_utpm};

#[test]
fn solve_inverts_matmul() {
    let a = random_regular_utpm(3, 2, 4);
    let x = random_utpm(3, 2, 4, 1);

    let rhs = a.dot(&x).unwrap();
    let recovered = a.solve(&rhs).unwrap();

    assert_abs_diff_eq!(recovered.coeffs(), x.coeffs(), epsilon = 1e-6);
}

#[test]
fn solve_rejects_multi_column_rhs() {
    let a = random_regular_utpm(1, 1, 3);
    let x = random_utpm(1, 1, 3, 2);
    assert!(a.solve(&x).is_err());
}
