//! Trailing mean with prefix (min-periods-1) semantics.

/// Trailing mean over up to `window` points ending at each index.
///
/// Before the window fills, the mean covers the available prefix, so the
/// output is defined from the first point on and never looks ahead.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "window must be >= 1");

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, &value) in values.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= values[i - window];
        }
        let count = (i + 1).min(window);
        out.push(sum / count as f64);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn prefix_means_before_the_window_fills() {
        let result = trailing_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        let expected = [1.0, 1.5, 2.0, 3.0, 4.0];
        for (actual, want) in result.iter().zip(expected) {
            assert_approx(*actual, want, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn constant_series_stays_constant() {
        let result = trailing_mean(&[7.0; 20], 7);
        for value in result {
            assert_approx(value, 7.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn window_one_is_the_identity() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(trailing_mean(&values, 1), values.to_vec());
    }

    #[test]
    fn window_larger_than_series_averages_the_prefix() {
        let result = trailing_mean(&[2.0, 4.0], 7);
        assert_approx(result[0], 2.0, DEFAULT_EPSILON);
        assert_approx(result[1], 3.0, DEFAULT_EPSILON);
    }
}
