use ndarray::array;

use utpm::{CGraph, Utpm};

fn main() {
    let mut graph = CGraph::new();

    let a = Utpm::constant(array![[1.0, 2.0], [3.0, 4.0]].view(), 1, 1);
    let x = Utpm::constant(array![[5.0], [6.0]].view(), 1, 1);

    let a_node = graph.record_leaf(a);
    let x_node = graph.record_leaf(x);
    let z_node = graph.dot(a_node, x_node).expect("record dot");

    graph.set_independents(vec![(a_node, 0), (x_node, 0)]);
    graph.set_dependents(vec![(z_node, 0)]);

    let seed = Utpm::constant(array![[1.0], [1.0]].view(), 1, 1);
    graph.reverse(vec![seed]).expect("reverse sweep");

    println!("z = A . x = {}", graph.value(z_node, 0).base_point(0));
    println!("dA = {}", graph.adjoint(a_node, 0).base_point(0));
    println!("dx = {}", graph.adjoint(x_node, 0).base_point(0));
}
