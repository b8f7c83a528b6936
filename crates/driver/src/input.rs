//! Input sequence construction

use crate::error::DriverError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// How to build the input sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    /// `size` consecutive values starting at `start`
    Sequential { start: i32, size: usize },
    /// `size` values drawn uniformly from `min..=max` with a fixed seed
    Random {
        seed: u64,
        size: usize,
        min: i32,
        max: i32,
    },
}

impl InputSpec {
    /// Number of elements this spec produces
    pub fn len(&self) -> usize {
        match self {
            InputSpec::Sequential { size, .. } | InputSpec::Random { size, .. } => *size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialize the sequence
    pub fn build(&self) -> Result<Vec<i32>, DriverError> {
        match *self {
            InputSpec::Sequential { start, size } => {
                // The last value is start + size - 1 and must fit in i32
                if size > 0 {
                    let last = i64::from(start) + (size as i64 - 1);
                    if last > i64::from(i32::MAX) {
                        return Err(DriverError::InvalidInput(format!(
                            "sequence {}..{} leaves the i32 range",
                            start,
                            i64::from(start) + size as i64
                        )));
                    }
                }
                Ok((0..size)
                    .map(|i| (i64::from(start) + i as i64) as i32)
                    .collect())
            }
            InputSpec::Random {
                seed,
                size,
                min,
                max,
            } => {
                if min > max {
                    return Err(DriverError::InvalidInput(format!(
                        "random range min {} is greater than max {}",
                        min, max
                    )));
                }
                let mut rng = StdRng::seed_from_u64(seed);
                Ok((0..size).map(|_| rng.gen_range(min..=max)).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_default_shape() {
        let values = InputSpec::Sequential {
            start: 0,
            size: 5,
        }
        .build()
        .unwrap();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_sequential_empty() {
        let spec = InputSpec::Sequential { start: 7, size: 0 };
        assert!(spec.is_empty());
        assert!(spec.build().unwrap().is_empty());
    }

    #[test]
    fn test_sequential_negative_start() {
        let values = InputSpec::Sequential {
            start: -2,
            size: 4,
        }
        .build()
        .unwrap();
        assert_eq!(values, vec![-2, -1, 0, 1]);
    }

    #[test]
    fn test_sequential_up_to_i32_max() {
        let values = InputSpec::Sequential {
            start: i32::MAX - 1,
            size: 2,
        }
        .build()
        .unwrap();
        assert_eq!(values, vec![i32::MAX - 1, i32::MAX]);
    }

    #[test]
    fn test_sequential_overflow_rejected() {
        let spec = InputSpec::Sequential {
            start: i32::MAX,
            size: 2,
        };
        assert!(matches!(spec.build(), Err(DriverError::InvalidInput(_))));
    }

    #[test]
    fn test_random_is_reproducible_and_in_range() {
        let spec = InputSpec::Random {
            seed: 42,
            size: 1000,
            min: -10,
            max: 10,
        };
        let a = spec.build().unwrap();
        let b = spec.build().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1000);
        assert!(a.iter().all(|v| (-10..=10).contains(v)));
    }

    #[test]
    fn test_random_inverted_range_rejected() {
        let spec = InputSpec::Random {
            seed: 1,
            size: 3,
            min: 5,
            max: -5,
        };
        assert!(matches!(spec.build(), Err(DriverError::InvalidInput(_))));
    }
}
