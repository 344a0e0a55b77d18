use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::Observation;
use crate::models::OhlcvSeries;

/// An `OhlcvSeries` plus the derived Simulated Timestamp column.
/// The wrapped series is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedSeries {
    original: OhlcvSeries,
    simulated_timestamps: Vec<DateTime<Utc>>,
    volume_threshold: f64,
}

/// Borrowed view of one row of a `SimulatedSeries`.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedRow<'a> {
    pub index: usize,
    pub observation: &'a Observation,
    pub simulated_timestamp: DateTime<Utc>,
}

impl SimulatedSeries {
    pub(crate) fn new(
        original: OhlcvSeries,
        simulated_timestamps: Vec<DateTime<Utc>>,
        volume_threshold: f64,
    ) -> Self {
        debug_assert_eq!(original.len(), simulated_timestamps.len());
        SimulatedSeries {
            original,
            simulated_timestamps,
            volume_threshold,
        }
    }

    pub fn original(&self) -> &OhlcvSeries {
        &self.original
    }

    /// Drop the derived column and hand back the untouched original table.
    pub fn into_original(self) -> OhlcvSeries {
        self.original
    }

    pub fn simulated_timestamps(&self) -> &[DateTime<Utc>] {
        &self.simulated_timestamps
    }

    /// Volume percentile cutoff that was in force when the delays were applied.
    pub fn volume_threshold(&self) -> f64 {
        self.volume_threshold
    }

    pub fn len(&self) -> usize {
        self.simulated_timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simulated_timestamps.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = SimulatedRow<'_>> {
        self.original
            .observations()
            .iter()
            .zip(self.simulated_timestamps.iter())
            .enumerate()
            .map(|(index, (observation, &simulated_timestamp))| SimulatedRow {
                index,
                observation,
                simulated_timestamp,
            })
    }
}

/// A row whose simulated timestamp went backwards relative to its predecessor.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossoverPoint {
    // Position in the original table
    pub index: usize,
    pub observation: Observation,
    pub simulated_timestamp: DateTime<Utc>,
    pub previous_simulated_timestamp: DateTime<Utc>,
}

impl CrossoverPoint {
    /// How far this row landed before its predecessor (always positive).
    pub fn overtake(&self) -> TimeDelta {
        self.previous_simulated_timestamp - self.simulated_timestamp
    }
}
