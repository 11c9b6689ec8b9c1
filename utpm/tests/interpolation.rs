use std::collections::HashSet;

use utpm::{gamma, multi_binomial, multi_indices};

/// S5: `multi_indices(3,2) = {(2,0,0),(1,1,0),(1,0,1),(0,2,0),(0,1,1),(0,0,2)}`.
#[test]
fn s5_multi_indices_of_three_variables_degree_two() {
    let got: HashSet<Vec<usize>> = multi_indices(3, 2).into_iter().collect();
    let expected: HashSet<Vec<usize>> = [
        vec![2, 0, 0],
        vec![1, 1, 0],
        vec![1, 0, 1],
        vec![0, 2, 0],
        vec![0, 1, 1],
        vec![0, 0, 2],
    ]
    .into_iter()
    .collect();
    assert_eq!(got, expected);
}

/// Property 6: `|multi_indices(N,D)| = C(N+D-1, D)`, every row sums to
/// `D`, no duplicates.
#[test]
fn multi_indices_count_and_sum_match_the_stars_and_bars_formula() {
    for n in 1..=4 {
        for d in 0..=4 {
            let rows = multi_indices(n, d);
            assert_eq!(rows.len(), stars_and_bars(n, d));
            for row in &rows {
                assert_eq!(row.len(), n);
                assert_eq!(row.iter().sum::<usize>(), d);
            }
            let unique: HashSet<_> = rows.iter().cloned().collect();
            assert_eq!(unique.len(), rows.len());
        }
    }
}

fn stars_and_bars(n: usize, d: usize) -> usize {
    // C(n+d-1, d)
    let top = n + d - 1;
    let mut num = 1u128;
    let mut den = 1u128;
    for i in 0..d {
        num *= (top - i) as u128;
        den *= (i + 1) as u128;
    }
    (num / den) as usize
}

#[test]
fn multi_binomial_is_product_of_binomials() {
    // C(2,1)*C(3,0) = 2*1 = 2
    let z = vec![2, 3];
    let k = vec![1, 0];
    assert!((multi_binomial(&z, &k) - 2.0).abs() < 1e-12);
}

/// Property 5 (interpolation identity) specialized to `D=1`: seeding
/// along coordinate directions `e_j` and reading off `[t^1] f(x + t*e_j)
/// = grad(f)_j`, `gamma(e_k, e_j)` must act as the Kronecker delta so
/// that the reconstructed partial `∂f/∂x_k` picks out exactly the `j=k`
/// univariate run.
#[test]
fn gamma_is_kronecker_delta_at_first_order() {
    for n in 1..=4 {
        let directions = multi_indices(n, 1);
        for i in &directions {
            for j in &directions {
                let g = gamma(i, j);
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (g - expected).abs() < 1e-9,
                    "gamma({i:?}, {j:?}) = {g}, expected {expected}"
                );
            }
        }
    }
}
