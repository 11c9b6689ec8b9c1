use approx::assert_abs_diff_eq;
use ndarray::array;

use utpm::generate::{random_regular_utpm, random_utpm};
use utpm::{CGraph, Utpm};

/// S3: record `z = dot(A, x)` with `A` a `2x2` independent and `x` a
/// `2x1` independent, seed `z̄ = [1;1]`. Expect `Ā = [[x0,x1],[x0,x1]]`
/// and `x̄ = [A[0,0]+A[1,0]; A[0,1]+A[1,1]]`.
#[test]
fn s3_dot_reverse_mode_matches_the_textbook_pullback() {
    let mut graph = CGraph::new();

    let a_val = Utpm::constant(array![[1.0, 2.0], [3.0, 4.0]].view(), 1, 1);
    let x_val = Utpm::constant(array![[5.0], [6.0]].view(), 1, 1);

    let a_node = graph.record_leaf(a_val);
    let x_node = graph.record_leaf(x_val);
    let z_node = graph.dot(a_node, x_node).unwrap();

    graph.set_independents(vec![(a_node, 0), (x_node, 0)]);
    graph.set_dependents(vec![(z_node, 0)]);

    let seed = Utpm::constant(array![[1.0], [1.0]].view(), 1, 1);
    graph.reverse(vec![seed]).unwrap();

    let a_bar = graph.adjoint(a_node, 0);
    assert_abs_diff_eq!(a_bar.base_point(0), array![[5.0, 6.0], [5.0, 6.0]], epsilon = 1e-12);

    let x_bar = graph.adjoint(x_node, 0);
    assert_abs_diff_eq!(x_bar.base_point(0), array![[4.0], [6.0]], epsilon = 1e-12);
}

#[test]
fn reverse_without_dependents_is_reported_as_a_usage_error() {
    let mut graph = CGraph::new();
    let leaf = graph.record_leaf(Utpm::constant(array![[1.0]].view(), 1, 1));
    let _ = graph.add(leaf, leaf);
    let seed = Utpm::constant(array![[1.0]].view(), 1, 1);
    assert!(graph.reverse(vec![seed]).is_err());
}

/// Property 2: reverse-forward duality. For a recorded `y = dot(A, x)`
/// and random tangent seeds `Ȧ, ẋ` (one direction), a forward run with
/// those seeds should satisfy `<ȳ, ẏ> = <x̄,ẋ> + <Ā,Ȧ>`.
#[test]
fn reverse_forward_duality_holds_for_dot() {
    let a_val = random_utpm(1, 1, 2, 2);
    let x_val = random_utpm(1, 1, 2, 1);

    let mut graph = CGraph::new();
    let a_node = graph.record_leaf(a_val.clone());
    let x_node = graph.record_leaf(x_val.clone());
    let z_node = graph.dot(a_node, x_node).unwrap();
    graph.set_independents(vec![(a_node, 0), (x_node, 0)]);
    graph.set_dependents(vec![(z_node, 0)]);

    let ybar = random_utpm(1, 1, 2, 1);
    graph.reverse(vec![ybar.clone()]).unwrap();
    let abar = graph.adjoint(a_node, 0).clone();
    let xbar = graph.adjoint(x_node, 0).clone();

    let a_dot = random_utpm(1, 1, 2, 2);
    let x_dot = random_utpm(1, 1, 2, 1);

    let lhs = frobenius_inner(&abar, &a_dot) + frobenius_inner(&xbar, &x_dot);

    let term1 = a_dot.dot(&x_val).unwrap();
    let term2 = a_val.dot(&x_dot).unwrap();
    let y_dot = (&term1 + &term2).unwrap();
    let rhs = frobenius_inner(&ybar, &y_dot);

    assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-8);
}

#[test]
fn graph_forward_reuses_topology_with_new_leaf_values() {
    let mut graph = CGraph::new();
    let a_node = graph.record_leaf(random_regular_utpm(1, 1, 3));
    let x_node = graph.record_leaf(random_utpm(1, 1, 3, 1));
    let z_node = graph.dot(a_node, x_node).unwrap();
    graph.set_independents(vec![(a_node, 0), (x_node, 0)]);

    let new_a = random_regular_utpm(1, 1, 3);
    let new_x = random_utpm(1, 1, 3, 1);
    graph.forward(vec![new_a.clone(), new_x.clone()]).unwrap();

    let expected = new_a.dot(&new_x).unwrap();
    assert_abs_diff_eq!(
        graph.value(z_node, 0).coeffs(),
        expected.coeffs(),
        epsilon = 1e-8
    );
}

fn frobenius_inner(a: &Utpm, b: &Utpm) -> f64 {
    a.coeffs()
        .iter()
        .zip(b.coeffs().iter())
        .map(|(x, y)| x * y)
        .sum()
}
