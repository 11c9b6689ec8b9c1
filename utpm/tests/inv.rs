use approx::assert_abs_diff_eq;
use ndarray::array;

use utpm::generate::random_regular_utpm;
use utpm::Utpm;

/// S1: `A = diag(2,3)` as UTPM with `D=2,P=1`, `A[1] = I`. Expect
/// `inv(A)[0] = diag(1/2,1/3)`, `inv(A)[1] = -diag(1/4,1/9)`.
#[test]
fn s1_inverse_first_derivative() {
    let mut tc = ndarray::Array4::<f64>::zeros((2, 1, 2, 2));
    tc[[0, 0, 0, 0]] = 2.0;
    tc[[0, 0, 1, 1]] = 3.0;
    tc[[1, 0, 0, 0]] = 1.0;
    tc[[1, 0, 1, 1]] = 1.0;
    let a = Utpm::from_coeffs(tc);

    let inv_a = a.inv().unwrap();
    assert_abs_diff_eq!(
        inv_a.base_point(0),
        array![[0.5, 0.0], [0.0, 1.0 / 3.0]],
        epsilon = 1e-10
    );
    assert_abs_diff_eq!(
        inv_a.coefficient(1, 0),
        array![[-0.25, 0.0], [0.0, -1.0 / 9.0]],
        epsilon = 1e-10
    );
}

#[test]
fn inv_inv_round_trips() {
    let a = random_regular_utpm(3, 2, 4);
    let round_tripped = a.inv().unwrap().inv().unwrap();
    assert_abs_diff_eq!(round_tripped.coeffs(), a.coeffs(), epsilon = 1e-6);
}

#[test]
fn inv_rejects_non_square() {
    let a = Utpm::constant(array![[1.0, 2.0, 3.0]].view(), 1, 1);
    assert!(a.inv().is_err());
}
