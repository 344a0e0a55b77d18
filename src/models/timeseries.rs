use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Observation;

// ============================================================================
// OhlcvSeries: chronologically ordered daily table for one symbol
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OhlcvSeries {
    symbol: String,
    interval_ms: i64,
    observations: Vec<Observation>,
}

#[derive(Debug, PartialEq)]
pub enum SeriesError {
    NotChronological {
        index: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
}

impl std::error::Error for SeriesError {}
impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SeriesError::NotChronological {
                index,
                previous,
                current,
            } => write!(
                f,
                "row {} at {} does not come after the previous row at {}",
                index, current, previous
            ),
        }
    }
}

impl OhlcvSeries {
    /// Rows must have strictly increasing timestamps.
    pub fn new(
        symbol: impl Into<String>,
        interval_ms: i64,
        observations: Vec<Observation>,
    ) -> Result<Self, SeriesError> {
        if let Some(index) = observations
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(SeriesError::NotChronological {
                index: index + 1,
                previous: observations[index].timestamp,
                current: observations[index + 1].timestamp,
            });
        }
        Ok(OhlcvSeries {
            symbol: symbol.into(),
            interval_ms,
            observations,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.observations.first().map(|o| o.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.observations.last().map(|o| o.timestamp)
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.volume).collect()
    }

    pub fn close_prices(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.close_price).collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;

    use crate::utils::TimeUtils;

    /// Daily series starting 2022-01-01 with the given volumes and a rising close.
    pub fn daily_series(volumes: &[f64]) -> OhlcvSeries {
        let start = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        let observations = volumes
            .iter()
            .enumerate()
            .map(|(i, &volume)| {
                let price = 100.0 + i as f64;
                Observation::new(
                    start + chrono::Duration::days(i as i64),
                    price,
                    price + 2.0,
                    price - 2.0,
                    price + 1.0,
                    volume,
                )
            })
            .collect();
        OhlcvSeries::new("BTCUSDT", TimeUtils::MS_IN_D, observations).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::daily_series;
    use super::*;

    #[test]
    fn test_accessors() {
        let series = daily_series(&[1.0, 2.0, 3.0]);
        assert_eq!(series.len(), 3);
        assert_eq!(series.volumes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.close_prices(), vec![101.0, 102.0, 103.0]);
        assert!(series.first_timestamp() < series.last_timestamp());
    }

    #[test]
    fn test_rejects_out_of_order_rows() {
        let series = daily_series(&[1.0, 2.0, 3.0]);
        let mut rows = series.observations().to_vec();
        rows.swap(1, 2);
        let err = OhlcvSeries::new("BTCUSDT", series.interval_ms(), rows).unwrap_err();
        assert!(matches!(err, SeriesError::NotChronological { index: 2, .. }));
    }

    #[test]
    fn test_rejects_duplicate_dates() {
        let series = daily_series(&[1.0, 2.0]);
        let mut rows = series.observations().to_vec();
        rows[1].timestamp = rows[0].timestamp;
        assert!(OhlcvSeries::new("BTCUSDT", series.interval_ms(), rows).is_err());
    }

    #[test]
    fn test_empty_series_is_valid() {
        let series = OhlcvSeries::new("BTCUSDT", 0, Vec::new()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.first_timestamp(), None);
    }
}
