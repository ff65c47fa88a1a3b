//! Reductions over input values.
//!
//! Sums and products are associative and commutative up to floating-point
//! rounding, so above the configured threshold they are split across the
//! rayon pool. The result may differ from the sequential one in the last bits.

use rayon::prelude::*;

/// Sum of `map(v)` over `values`. Empty input yields `0.0`.
pub(crate) fn sum_by<F>(values: &[f64], parallel_threshold: usize, map: F) -> f64
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    if values.len() >= parallel_threshold {
        values.par_iter().map(|&v| map(v)).reduce(|| 0.0, |a, b| a + b)
    } else {
        values.iter().fold(0.0, |acc, &v| acc + map(v))
    }
}

/// Product of `values`. Empty input yields `1.0`.
pub(crate) fn product(values: &[f64], parallel_threshold: usize) -> f64 {
    if values.len() >= parallel_threshold {
        values.par_iter().copied().reduce(|| 1.0, |a, b| a * b)
    } else {
        values.iter().fold(1.0, |acc, &v| acc * v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identities_for_empty_input() {
        assert_eq!(sum_by(&[], usize::MAX, |v| v), 0.0);
        assert!(sum_by(&[], usize::MAX, |v| v).is_sign_positive());
        assert_eq!(product(&[], usize::MAX), 1.0);
    }

    #[test]
    fn parallel_matches_sequential_on_exact_values() {
        let values: Vec<f64> = (1..=64).map(f64::from).collect();
        let sequential = sum_by(&values, usize::MAX, |v| v * 2.0);
        let parallel = sum_by(&values, 0, |v| v * 2.0);
        assert_eq!(sequential, 4160.0);
        assert_eq!(parallel, sequential);

        let small = [2.0, 0.5, 4.0, 0.25];
        assert_eq!(product(&small, 0), product(&small, usize::MAX));
    }
}
