//! Arithmetic utilities.

use num_complex::Complex64;

/// Divide a real vector by its Euclidean norm.
///
/// A zero vector yields non-finite entries.
pub fn normalize_vector(vector: &[f64]) -> Vec<f64> {
    let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
    vector.iter().map(|x| x / norm).collect()
}

/// Divide a complex vector by its Euclidean norm.
pub fn normalize_complex_vector(vector: &[Complex64]) -> Vec<Complex64> {
    let norm = vector.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt();
    vector.iter().map(|x| x / norm).collect()
}

/// Check whether `num` is a power of two.
pub fn is_power_of_2(num: u64) -> bool {
    num != 0 && (num & (num - 1)) == 0
}

/// Base-2 logarithm, exact for powers of two.
#[allow(clippy::cast_precision_loss)]
pub fn log2(num: u64) -> f64 {
    if is_power_of_2(num) {
        let mut ret = 0u32;
        while num >> ret != 1 {
            ret += 1;
        }
        f64::from(ret)
    } else {
        (num as f64).log2()
    }
}

/// Check whether `num` is a perfect power `m^b` with `b >= 2`.
///
/// Returns `(true, m, b)` for the smallest exponent found, or
/// `(false, num, 1)`. Runs in O(log³ num).
pub fn is_power(num: u64) -> (bool, u64, u32) {
    let mut b = 2u32;
    while b < 64 && (1u64 << b) <= num {
        let mut a = 1u64;
        let mut c = num;
        while c - a >= 2 {
            let m = a + (c - a) / 2;
            // None means m^b overflowed and so exceeds num
            match m.checked_pow(b) {
                Some(p) if p == num => return (true, m, b),
                Some(p) if p < num => a = m,
                _ => c = m,
            }
        }
        b += 1;
    }
    (false, num, 1)
}
