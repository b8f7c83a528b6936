//! Host-side reference computation
//!
//! Mirrors what an interpreted language does for `total += x * x`: every
//! element is boxed into an arbitrary-precision integer and the running total
//! never overflows. This is the baseline the native kernel is compared with.

use num_bigint::BigInt;

/// Sum of squares with an arbitrary-precision accumulator
pub fn host_sum_of_squares(values: &[i32]) -> BigInt {
    let mut total = BigInt::from(0);
    for &value in values {
        let value = BigInt::from(value);
        total += &value * &value;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(host_sum_of_squares(&[]).to_string(), "0");
    }

    #[test]
    fn test_small_sequence() {
        assert_eq!(host_sum_of_squares(&[0, 1, 2, 3, 4]).to_string(), "30");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(host_sum_of_squares(&[-5, 5]).to_string(), "50");
    }

    #[test]
    fn test_exceeds_i64() {
        let values = [i32::MIN; 4];
        assert_eq!(
            host_sum_of_squares(&values).to_string(),
            "18446744073709551616"
        );
    }
}
