use approx::assert_abs_diff_eq;
use ndarray::array;

use utpm::Utpm;

/// S2: `x = [1;2]` with `D=2,P=1`, `x[1] = [1;0]`. `y = xᵀ·x`. Expect
/// `y[0] = 5`, `y[1] = 2`.
#[test]
fn s2_dot_product_first_derivative() {
    let mut tc = ndarray::Array4::<f64>::zeros((2, 1, 2, 1));
    tc[[0, 0, 0, 0]] = 1.0;
    tc[[0, 0, 1, 0]] = 2.0;
    tc[[1, 0, 0, 0]] = 1.0;
    let x = Utpm::from_coeffs(tc);

    let y = x.transpose().dot(&x).unwrap();
    assert_abs_diff_eq!(y.coefficient(0, 0)[[0, 0]], 5.0, epsilon = 1e-12);
    assert_abs_diff_eq!(y.coefficient(1, 0)[[0, 0]], 2.0, epsilon = 1e-12);
}

#[test]
fn add_is_coefficientwise() {
    let a = Utpm::constant(array![[1.0, 2.0]].view(), 2, 1);
    let b = Utpm::constant(array![[3.0, 4.0]].view(), 2, 1);
    let c = (&a + &b).unwrap();
    assert_abs_diff_eq!(c.base_point(0), array![[4.0, 6.0]], epsilon = 1e-12);
}

#[test]
fn sub_is_coefficientwise() {
    let a = Utpm::constant(array![[5.0, 5.0]].view(), 1, 1);
    let b = Utpm::constant(array![[2.0, 1.0]].view(), 1, 1);
    let c = (&a - &b).unwrap();
    assert_abs_diff_eq!(c.base_point(0), array![[3.0, 4.0]], epsilon = 1e-12);
}

#[test]
fn mul_and_div_elementwise_round_trip() {
    let mut tc_a = ndarray::Array4::<f64>::zeros((3, 1, 1, 2));
    tc_a[[0, 0, 0, 0]] = 2.0;
    tc_a[[0, 0, 0, 1]] = 3.0;
    tc_a[[1, 0, 0, 0]] = 1.0;
    tc_a[[1, 0, 0, 1]] = -1.0;
    let a = Utpm::from_coeffs(tc_a);

    let mut tc_b = ndarray::Array4::<f64>::zeros((3, 1, 1, 2));
    tc_b[[0, 0, 0, 0]] = 5.0;
    tc_b[[0, 0, 0, 1]] = 7.0;
    tc_b[[1, 0, 0, 0]] = 2.0;
    tc_b[[1, 0, 0, 1]] = 0.5;
    let b = Utpm::from_coeffs(tc_b);

    let product = (&a * &b).unwrap();
    let recovered = (&product / &b).unwrap();
    assert_abs_diff_eq!(recovered.base_point(0), a.base_point(0), epsilon = 1e-9);
    assert_abs_diff_eq!(
        recovered.coefficient(1, 0),
        a.coefficient(1, 0),
        epsilon = 1e-9
    );
}

#[test]
fn scalar_add_only_touches_base_point() {
    let a = Utpm::constant(array![[1.0]].view(), 2, 1);
    let mut tc = a.coeffs().clone();
    tc[[1, 0, 0, 0]] = 9.0;
    let a = Utpm::from_coeffs(tc);

    let shifted = &a + 10.0;
    assert_abs_diff_eq!(shifted.base_point(0)[[0, 0]], 11.0, epsilon = 1e-12);
    assert_abs_diff_eq!(shifted.coefficient(1, 0)[[0, 0]], 9.0, epsilon = 1e-12);
}

#[test]
fn shape_mismatch_is_reported() {
    let a = Utpm::constant(array![[1.0, 2.0]].view(), 1, 1);
    let b = Utpm::constant(array![[1.0], [2.0]].view(), 1, 1);
    assert!((&a + &b).is_err());
}
