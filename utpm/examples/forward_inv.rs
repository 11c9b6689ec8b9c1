use utpm::Utpm;

fn main() {
    let mut tc = ndarray::Array4::<f64>::zeros((2, 1, 2, 2));
    tc[[0, 0, 0, 0]] = 2.0;
    tc[[0, 0, 1, 1]] = 3.0;
    tc[[1, 0, 0, 0]] = 1.0;
    tc[[1, 0, 1, 1]] = 1.0;
    let a = Utpm::from_coeffs(tc);

    let inv_a = a.inv().expect("inv");
    println!("inv(A)[0] = {}", inv_a.base_point(0));
    println!("inv(A)[1] = {}", inv_a.coefficient(1, 0));
}
