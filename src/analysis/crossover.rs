use crate::models::{CrossoverPoint, SimulatedSeries};

/// Rows whose simulated timestamp is strictly earlier than the previous row's.
///
/// Compares each row only with its immediate predecessor in table order, so the
/// first row can never be a crossover and a table with fewer than two rows
/// yields nothing. Output keeps the original row order.
pub fn detect_crossovers(simulated: &SimulatedSeries) -> Vec<CrossoverPoint> {
    let observations = simulated.original().observations();
    simulated
        .simulated_timestamps()
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[1] < pair[0])
        .map(|(i, pair)| CrossoverPoint {
            index: i + 1,
            observation: observations[i + 1].clone(),
            simulated_timestamp: pair[1],
            previous_simulated_timestamp: pair[0],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::latency::test_support::{ConstantDelay, FixedDelays};
    use crate::analysis::{GaussianDelays, LatencyParams, apply_latency};
    use crate::models::timeseries::test_support::daily_series;

    const DAY: f64 = 86_400.0;

    fn flat_params() -> LatencyParams {
        // Percentile 100 keeps every delay un-amplified
        LatencyParams {
            volume_threshold_percentile: 100.0,
            ..LatencyParams::default()
        }
    }

    #[test]
    fn test_detects_overtaken_row() {
        // Row 1 is delayed by two days and lands after row 2
        let series = daily_series(&[1.0, 1.0, 1.0, 1.0]);
        let mut source = FixedDelays(vec![0.0, 2.0 * DAY, 0.0, 0.0]);
        let (simulated, _) = apply_latency(series, &flat_params(), &mut source).unwrap();

        let points = detect_crossovers(&simulated);
        assert_eq!(points.len(), 1);
        let point = &points[0];
        assert_eq!(point.index, 2);
        assert_eq!(point.observation, simulated.original().observations()[2]);
        assert_eq!(point.overtake(), chrono::TimeDelta::days(1));
    }

    #[test]
    fn test_equal_timestamps_are_not_crossovers() {
        // Row 0 shifted by one day lands exactly on row 1
        let series = daily_series(&[1.0, 1.0]);
        let mut source = FixedDelays(vec![DAY, 0.0]);
        let (simulated, _) = apply_latency(series, &flat_params(), &mut source).unwrap();
        assert!(detect_crossovers(&simulated).is_empty());
    }

    #[test]
    fn test_crossovers_keep_original_order() {
        let series = daily_series(&[1.0; 6]);
        let mut source = FixedDelays(vec![3.0 * DAY, 0.0, 0.0, 2.5 * DAY, 0.0, 0.0]);
        let (simulated, _) = apply_latency(series, &flat_params(), &mut source).unwrap();
        let indices: Vec<usize> = detect_crossovers(&simulated).iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![1, 4]);
    }

    #[test]
    fn test_zero_and_single_row_tables() {
        for volumes in [&[][..], &[5.0][..]] {
            let series = daily_series(volumes);
            let mut source = ConstantDelay(-10.0 * DAY);
            let (simulated, _) = apply_latency(series, &flat_params(), &mut source).unwrap();
            assert!(detect_crossovers(&simulated).is_empty());
        }
    }

    #[test]
    fn test_count_bounded_by_rows_minus_one() {
        let volumes: Vec<f64> = (0..200).map(|i| (i % 17) as f64 * 1_000.0).collect();
        for seed in 0..20 {
            let series = daily_series(&volumes);
            // Std far larger than the row spacing forces many crossovers
            let mut source = GaussianDelays::seeded(0.0, 10.0 * DAY, seed).unwrap();
            let (simulated, _) =
                apply_latency(series, &LatencyParams::default(), &mut source).unwrap();
            assert!(detect_crossovers(&simulated).len() <= simulated.len() - 1);
        }
    }

    #[test]
    fn test_detection_is_deterministic() {
        let series = daily_series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let mut source = GaussianDelays::seeded(DAY, 2.0 * DAY, 3).unwrap();
        let (simulated, _) = apply_latency(series, &LatencyParams::default(), &mut source).unwrap();
        assert_eq!(detect_crossovers(&simulated), detect_crossovers(&simulated));
    }

    #[test]
    fn test_no_crossovers_without_latency() {
        let series = daily_series(&[10.0, 20.0, 30.0, 40.0]);
        let zero = LatencyParams {
            mean_latency_secs: 0.0,
            std_latency_secs: 0.0,
            ..LatencyParams::default()
        };
        let mut source = GaussianDelays::from_params(&zero, None).unwrap();
        let (simulated, _) = apply_latency(series, &zero, &mut source).unwrap();
        assert!(detect_crossovers(&simulated).is_empty());
    }
}
