use argminmax::ArgMinMax;
use statrs::statistics::{Data, OrderStatistics, Statistics};

pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// (min, max) of a slice, or None when it is empty.
pub fn get_min_max(vec: &[f64]) -> Option<(f64, f64)> {
    if vec.is_empty() {
        return None;
    }
    let (min_index, max_index) = vec.argminmax();
    Some((vec[min_index], vec[max_index]))
}

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(vec: &[f64]) -> f64 {
    vec.iter().mean()
}

/// The `pct`-th percentile (0-100) of `values`.
/// Uses statrs' default quantile estimator. NaN when `values` is empty or `pct` is out of range.
pub fn percentile(values: &[f64], pct: f64) -> f64 {
    let mut data = Data::new(values.to_vec());
    data.quantile(pct / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max() {
        let v = [3.0, -1.5, 7.25, 0.0];
        assert_eq!(get_min(&v), -1.5);
        assert_eq!(get_max(&v), 7.25);
        assert_eq!(get_min_max(&v), Some((-1.5, 7.25)));
        assert_eq!(get_min_max(&[]), None);
    }

    #[test]
    fn test_percentile_bounds() {
        let v = [5.0, 1.0, 3.0, 2.0, 4.0];
        assert_eq!(percentile(&v, 0.0), 1.0);
        assert_eq!(percentile(&v, 100.0), 5.0);
        assert_eq!(percentile(&v, 50.0), 3.0);
    }

    #[test]
    fn test_percentile_separates_outlier() {
        let v = [10.0, 10.0, 1000.0];
        let threshold = percentile(&v, 75.0);
        assert!(threshold > 10.0);
        assert!(threshold < 1000.0);
    }

    #[test]
    fn test_percentile_empty_is_nan() {
        assert!(percentile(&[], 75.0).is_nan());
        assert!(mean(&[]).is_nan());
    }
}
