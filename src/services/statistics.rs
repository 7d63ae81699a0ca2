//! Reductions over the per-trial shortage series of one district.
//!
//! The report carries the mean and the population standard deviation (the
//! sum of squared deviations divided by the number of trials), plus a few
//! nearest-rank percentiles so planners can read the bad tail directly.
//! An empty series has no statistics.

pub fn mean(values: &[u64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|value| *value as f64).sum();
    Some(sum / values.len() as f64)
}

pub fn population_std_dev(values: &[u64]) -> Option<f64> {
    let mean = mean(values)?;
    let squared_deviations: f64 = values
        .iter()
        .map(|value| (*value as f64 - mean).powi(2))
        .sum();
    Some((squared_deviations / values.len() as f64).sqrt())
}

/// Nearest-rank percentile of an ascending series. Requests outside
/// `0..=100` clamp to the smallest or largest trial.
pub fn percentile_sorted<T: Copy>(sorted_values: &[T], percentile: f64) -> Option<T> {
    let last = sorted_values.len().checked_sub(1)?;
    let rank = (percentile.clamp(0.0, 100.0) / 100.0 * last as f64).round() as usize;
    sorted_values.get(rank.min(last)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_has_no_statistics() {
        assert_eq!(mean(&[]), None);
        assert_eq!(population_std_dev(&[]), None);
        assert_eq!(percentile_sorted::<u64>(&[], 50.0), None);
    }

    #[test]
    fn population_std_dev_divides_by_n() {
        let values = [2, 4, 6];
        assert_eq!(mean(&values), Some(4.0));
        let std_dev = population_std_dev(&values).unwrap();
        assert!((std_dev - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((std_dev - 1.633).abs() < 1e-3);
    }

    #[test]
    fn constant_series_has_zero_spread() {
        assert_eq!(population_std_dev(&[5, 5, 5, 5]), Some(0.0));
        assert_eq!(population_std_dev(&[9]), Some(0.0));
    }

    #[test]
    fn percentile_sorted_clamps_and_rounds() {
        let values = [0, 1, 2, 3, 4];
        assert_eq!(percentile_sorted(&values, -1.0), Some(0));
        assert_eq!(percentile_sorted(&values, 50.0), Some(2));
        assert_eq!(percentile_sorted(&values, 85.0), Some(3));
        assert_eq!(percentile_sorted(&values, 100.0), Some(4));
        assert_eq!(percentile_sorted(&values, 250.0), Some(4));
    }
}
