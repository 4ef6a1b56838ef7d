
const EPSILON: f64 = 1e-6;

fn float_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn assert_float_eq(a: f64, b: f64) {
    assert!(float_eq(a, b), "expected {} to be close to {}", a, b);
}
