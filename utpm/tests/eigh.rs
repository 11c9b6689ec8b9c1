use approx::assert_abs_diff_eq;

use utpm::Utpm;

/// S4: symmetric `A = [[4,1],[1,3]]`, `D=3,P=1`, `A[1]=I`, `A[2]=0`.
/// Compute `(L,Q) = eigh(A)`; verify `Q·diag(L)·Qᵀ == A` at every order
/// and `Qᵀ·Q == I`.
#[test]
fn s4_eigh_reconstructs_and_is_orthogonal_every_order() {
    let mut tc = ndarray::Array4::<f64>::zeros((3, 1, 2, 2));
    tc[[0, 0, 0, 0]] = 4.0;
    tc[[0, 0, 0, 1]] = 1.0;
    tc[[0, 0, 1, 0]] = 1.0;
    tc[[0, 0, 1, 1]] = 3.0;
    tc[[1, 0, 0, 0]] = 1.0;
    tc[[1, 0, 1, 1]] = 1.0;
    let a = Utpm::from_coeffs(tc);

    let (l, q) = a.eigh().unwrap();
    let diag_l = l.diag().unwrap();

    let reconstructed = q.dot(&diag_l).unwrap().dot(&q.transpose()).unwrap();
    assert_abs_diff_eq!(reconstructed.coeffs(), a.coeffs(), epsilon = 1e-7);

    let qtq = q.transpose().dot(&q).unwrap();
    let mut identity = ndarray::Array4::<f64>::zeros((3, 1, 2, 2));
    identity[[0, 0, 0, 0]] = 1.0;
    identity[[0, 0, 1, 1]] = 1.0;
    assert_abs_diff_eq!(qtq.coeffs(), &identity, epsilon = 1e-7);
}

#[test]
fn eigh_rejects_non_symmetric_at_the_base_point() {
    let mut tc = ndarray::Array4::<f64>::zeros((1, 1, 2, 2));
    tc[[0, 0, 0, 1]] = 1.0;
    let a = Utpm::from_coeffs(tc);
    assert!(a.eigh().is_err());
}
