use dense_linalg::dense_solve;
use ndarray::array;

fn main() {
    let a = array![[3.0, 1.0], [1.0, 2.0]];
    let b = array![9.0, 8.0];
    let x = dense_solve(a.view(), b.view()).expect("solve");
    println!("x = {x}");
}
