use serde::{Deserialize, Serialize};

use crate::utils::maths_utils;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Equal-width histogram over `[min, max]` of the input.
/// Bins are half-open except the last one, which also takes the max.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn from_values(values: &[f64], n_bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let Some((mut min, mut max)) = maths_utils::get_min_max(&finite) else {
            return Self::default();
        };
        if n_bins == 0 {
            return Self::default();
        }
        // A single repeated value still gets a visible bar
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / n_bins as f64;
        let mut bins: Vec<HistogramBin> = (0..n_bins)
            .map(|i| HistogramBin {
                lower: min + i as f64 * width,
                upper: if i + 1 == n_bins {
                    max
                } else {
                    min + (i + 1) as f64 * width
                },
                count: 0,
            })
            .collect();

        for value in finite {
            let index = (((value - min) / width) as usize).min(n_bins - 1);
            bins[index].count += 1;
        }

        Histogram { bins }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_every_value() {
        let values = [0.0, 1.0, 1.5, 2.0, 3.9, 4.0];
        let hist = Histogram::from_values(&values, 4);
        assert_eq!(hist.bins.len(), 4);
        assert_eq!(hist.total(), values.len());
        // [0,1) [1,2) [2,3) [3,4]
        let counts: Vec<usize> = hist.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 2, 1, 2]);
        assert_eq!(hist.bins[3].upper, 4.0);
    }

    #[test]
    fn test_single_value_is_widened() {
        let hist = Histogram::from_values(&[24.0, 24.0, 24.0], 1);
        assert_eq!(hist.bins.len(), 1);
        assert_eq!(hist.bins[0].lower, 23.5);
        assert_eq!(hist.bins[0].upper, 24.5);
        assert_eq!(hist.bins[0].count, 3);
        assert_eq!(hist.bins[0].center(), 24.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(Histogram::from_values(&[], 30).is_empty());
        assert!(Histogram::from_values(&[1.0, 2.0], 0).is_empty());
        assert!(Histogram::from_values(&[f64::NAN], 10).is_empty());
    }

    #[test]
    fn test_negative_values_are_binned() {
        let hist = Histogram::from_values(&[-2.0, -1.0, 0.0, 1.0, 2.0], 2);
        assert_eq!(hist.bins[0].lower, -2.0);
        assert_eq!(hist.bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(hist.max_count(), 3);
        assert_eq!(hist.bins[0].width(), 2.0);
    }
}
