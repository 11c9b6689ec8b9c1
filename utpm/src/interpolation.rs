//! Multi-index enumeration and the Griewank interpolation coefficients
//! that convert univariate Taylor runs into a multivariate derivative
//! tensor (Griewank & Walther, eqn. 13.13).

/// Enumerates every multi-index of length `n` whose entries sum to `d`,
/// in lexicographically descending order: recursive descent fixing each
/// coordinate from its maximum allowable value downward.
pub fn multi_indices(n: usize, d: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut current = vec![0usize; n];
    descend(0, d, n, &mut current, &mut out);
    out
}

fn descend(pos: usize, remaining: usize, n: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    if pos == n - 1 {
        current[pos] = remaining;
        out.push(current.clone());
        return;
    }
    for a in (0..=remaining).rev() {
        current[pos] = a;
        descend(pos + 1, remaining - a, n, current, out);
    }
}

fn binomial(z: i64, k: i64) -> f64 {
    if k == 0 {
        return 1.0;
    }
    if k < 0 || k > z {
        return 0.0;
    }
    let mut numerator = 1.0;
    for i in 0..k {
        numerator *= (z - i) as f64;
    }
    let mut denominator = 1.0;
    for i in 1..=k {
        denominator *= i as f64;
    }
    numerator / denominator
}

/// `multi_binomial(z,k) = prod_n C(z_n, k_n)`.
pub fn multi_binomial(z: &[usize], k: &[usize]) -> f64 {
    z.iter()
        .zip(k.iter())
        .map(|(&zi, &ki)| binomial(zi as i64, ki as i64))
        .product()
}

/// Maps a multi-index row to the tuple of `|i|` coordinate indices that
/// addresses the corresponding element of the symmetric derivative
/// tensor: coordinate `n` repeated `i[n]` times.
pub fn positions_from_multi_index(i: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(i.iter().sum());
    for (coord, &count) in i.iter().enumerate() {
        out.extend(std::iter::repeat(coord).take(count));
    }
    out
}

/// Griewank & Walther eqn. 13.13: converts `D` univariate Taylor runs
/// seeded along basis directions `j` into the multivariate derivative
/// tensor coefficient at multi-index `i`.
pub fn gamma(i: &[usize], j: &[usize]) -> f64 {
    let n = i.len();
    let d: usize = j.iter().sum();
    let i_abs: i64 = i.iter().sum::<usize>() as i64;

    let mut total = 0.0;
    let mut k = vec![0i64; n];
    accumulate(0, n, i, j, d, i_abs, &mut k, &mut total);
    total
}

fn accumulate(
    pos: usize,
    n: usize,
    i: &[usize],
    j: &[usize],
    d: usize,
    i_abs: i64,
    k: &mut Vec<i64>,
    total: &mut f64,
) {
    if pos == n {
        let k_abs: i64 = k.iter().sum();
        if k_abs == 0 {
            // |k| = 0 is defined as a zero contribution; guards the
            // division below.
            return;
        }
        let sign_exp: i64 = i
            .iter()
            .zip(k.iter())
            .map(|(&ii, &ki)| (ii as i64 - ki).abs())
            .sum();
        let sign = if sign_exp % 2 == 0 { 1.0 } else { -1.0 };

        let mut term2 = 1.0;
        for n_ in 0..n {
            term2 *= binomial(i[n_] as i64, k[n_]);
        }

        let mut term3 = 1.0;
        for n_ in 0..n {
            // D*k[n]/|k| is guaranteed integral by construction (eqn. 13.13).
            let numerator = ((d as f64) * (k[n_] as f64) / (k_abs as f64)).round() as i64;
            term3 *= binomial(numerator, j[n_] as i64);
        }

        let term4 = (k_abs as f64 / d as f64).powi(i_abs as i32);

        *total += sign * term2 * term3 * term4;
        return;
    }
    for a in 0..=(i[pos] as i64) {
        k[pos] = a;
        accumulate(pos + 1, n, i, j, d, i_abs, k, total);
    }
}
