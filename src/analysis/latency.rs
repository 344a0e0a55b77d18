//! Gaussian latency injection.
//!
//! Every observation gets one delay drawn from Normal(mean, std). Rows whose
//! volume is strictly above the configured volume percentile have their delay
//! multiplied by `volume_factor`. The delay (seconds) is added to the row's
//! timestamp to produce the Simulated Timestamp.
//!
//! Delays are not clamped, so a wide distribution can produce negative delays.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use rand::SeedableRng;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;

use crate::config::SIMULATION;
#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::models::{OhlcvSeries, SimulatedSeries};
use crate::utils::{TimeUtils, maths_utils};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyParams {
    pub mean_latency_secs: f64,
    pub std_latency_secs: f64,
    pub volume_factor: f64,
    // 0 - 100
    pub volume_threshold_percentile: f64,
}

impl Default for LatencyParams {
    fn default() -> Self {
        Self {
            mean_latency_secs: SIMULATION.mean_latency_secs,
            std_latency_secs: SIMULATION.std_latency_secs,
            volume_factor: SIMULATION.volume_factor,
            volume_threshold_percentile: SIMULATION.volume_threshold_percentile,
        }
    }
}

impl LatencyParams {
    pub fn validate(&self) -> Result<(), LatencyError> {
        if !self.mean_latency_secs.is_finite() {
            return Err(LatencyError::InvalidMean(self.mean_latency_secs));
        }
        if !self.std_latency_secs.is_finite() || self.std_latency_secs < 0.0 {
            return Err(LatencyError::InvalidStdDev(self.std_latency_secs));
        }
        if !self.volume_factor.is_finite() {
            return Err(LatencyError::InvalidVolumeFactor(self.volume_factor));
        }
        if !(0.0..=100.0).contains(&self.volume_threshold_percentile) {
            return Err(LatencyError::InvalidPercentile(
                self.volume_threshold_percentile,
            ));
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
pub enum LatencyError {
    InvalidMean(f64),
    InvalidStdDev(f64),
    InvalidVolumeFactor(f64),
    InvalidPercentile(f64),
    InvalidVolume { index: usize, volume: f64 },
    DrawCountMismatch { expected: usize, drawn: usize },
    TimestampOverflow { index: usize, latency_secs: f64 },
}

impl std::error::Error for LatencyError {}
impl fmt::Display for LatencyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LatencyError::InvalidMean(mean) => write!(f, "mean latency {} is not finite", mean),
            LatencyError::InvalidStdDev(std) => write!(
                f,
                "latency standard deviation {} must be finite and >= 0",
                std
            ),
            LatencyError::InvalidVolumeFactor(factor) => {
                write!(f, "volume factor {} is not finite", factor)
            }
            LatencyError::InvalidPercentile(pct) => {
                write!(f, "volume threshold percentile {} is outside 0-100", pct)
            }
            LatencyError::InvalidVolume { index, volume } => write!(
                f,
                "row {} has volume {}, expected a finite non-negative number",
                index, volume
            ),
            LatencyError::DrawCountMismatch { expected, drawn } => write!(
                f,
                "delay source returned {} draws for {} observations",
                drawn, expected
            ),
            LatencyError::TimestampOverflow {
                index,
                latency_secs,
            } => write!(
                f,
                "row {} cannot be shifted by {}s without leaving the supported date range",
                index, latency_secs
            ),
        }
    }
}

/// Source of base (pre-multiplier) delays in seconds.
pub trait DelaySource {
    /// Draw `count` independent delays.
    fn draw(&mut self, count: usize) -> Vec<f64>;
}

enum BaseDistribution {
    Normal(Normal),
    // std == 0
    Constant(f64),
}

/// Normal(mean, std) delays. Unseeded unless built with `seeded`.
pub struct GaussianDelays {
    distribution: BaseDistribution,
    rng: StdRng,
}

impl GaussianDelays {
    pub fn new(mean_secs: f64, std_secs: f64) -> Result<Self, LatencyError> {
        Self::with_rng(mean_secs, std_secs, StdRng::from_entropy())
    }

    pub fn seeded(mean_secs: f64, std_secs: f64, seed: u64) -> Result<Self, LatencyError> {
        Self::with_rng(mean_secs, std_secs, StdRng::seed_from_u64(seed))
    }

    pub fn from_params(params: &LatencyParams, seed: Option<u64>) -> Result<Self, LatencyError> {
        match seed {
            Some(seed) => Self::seeded(params.mean_latency_secs, params.std_latency_secs, seed),
            None => Self::new(params.mean_latency_secs, params.std_latency_secs),
        }
    }

    fn with_rng(mean_secs: f64, std_secs: f64, rng: StdRng) -> Result<Self, LatencyError> {
        if !mean_secs.is_finite() {
            return Err(LatencyError::InvalidMean(mean_secs));
        }
        let distribution = if std_secs == 0.0 {
            BaseDistribution::Constant(mean_secs)
        } else {
            let normal =
                Normal::new(mean_secs, std_secs).map_err(|_| LatencyError::InvalidStdDev(std_secs))?;
            BaseDistribution::Normal(normal)
        };
        Ok(Self { distribution, rng })
    }
}

impl DelaySource for GaussianDelays {
    fn draw(&mut self, count: usize) -> Vec<f64> {
        match &self.distribution {
            BaseDistribution::Normal(normal) => {
                normal.sample_iter(&mut self.rng).take(count).collect()
            }
            BaseDistribution::Constant(value) => vec![*value; count],
        }
    }
}

/// Inject latency into `series`.
///
/// Returns the series with its Simulated Timestamp column, and the applied
/// (post-multiplier) delays in seconds, one per row in row order.
pub fn apply_latency(
    series: OhlcvSeries,
    params: &LatencyParams,
    delays: &mut dyn DelaySource,
) -> Result<(SimulatedSeries, Vec<f64>), LatencyError> {
    params.validate()?;

    let volumes = series.volumes();
    if let Some(index) = volumes.iter().position(|v| !v.is_finite() || *v < 0.0) {
        return Err(LatencyError::InvalidVolume {
            index,
            volume: volumes[index],
        });
    }

    let mut latencies = delays.draw(series.len());
    if latencies.len() != series.len() {
        return Err(LatencyError::DrawCountMismatch {
            expected: series.len(),
            drawn: latencies.len(),
        });
    }

    // "High volume" is strictly above the percentile cutoff
    let volume_threshold =
        maths_utils::percentile(&volumes, params.volume_threshold_percentile);
    for (latency, volume) in latencies.iter_mut().zip(&volumes) {
        if *volume > volume_threshold {
            *latency *= params.volume_factor;
        }
    }

    let simulated_timestamps = series
        .observations()
        .iter()
        .zip(&latencies)
        .enumerate()
        .map(|(index, (observation, &latency_secs))| {
            shift_by_secs(observation.timestamp, latency_secs).ok_or(
                LatencyError::TimestampOverflow {
                    index,
                    latency_secs,
                },
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_latency_draws {
        for (index, latency) in latencies.iter().enumerate() {
            log::info!("row {}: latency {:.1}s", index, latency);
        }
    }

    Ok((
        SimulatedSeries::new(series, simulated_timestamps, volume_threshold),
        latencies,
    ))
}

// Microsecond resolution
fn shift_by_secs(timestamp: DateTime<Utc>, secs: f64) -> Option<DateTime<Utc>> {
    let micros = (secs * 1_000_000.0).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return None;
    }
    timestamp.checked_add_signed(TimeDelta::microseconds(micros as i64))
}

/// Headline numbers for one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencySummary {
    pub rows: usize,
    pub volume_threshold: f64,
    pub amplified_rows: usize,
    pub min_latency_hours: f64,
    pub mean_latency_hours: f64,
    pub max_latency_hours: f64,
}

impl LatencySummary {
    pub fn new(simulated: &SimulatedSeries, latencies: &[f64]) -> Self {
        let volume_threshold = simulated.volume_threshold();
        let amplified_rows = simulated
            .original()
            .observations()
            .iter()
            .filter(|o| o.volume > volume_threshold)
            .count();
        let hours: Vec<f64> = latencies
            .iter()
            .map(|secs| secs / TimeUtils::SECS_IN_H)
            .collect();
        let (min_latency_hours, max_latency_hours) =
            maths_utils::get_min_max(&hours).unwrap_or((f64::NAN, f64::NAN));
        LatencySummary {
            rows: simulated.len(),
            volume_threshold,
            amplified_rows,
            min_latency_hours,
            mean_latency_hours: maths_utils::mean(&hours),
            max_latency_hours,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::DelaySource;

    /// Replays a fixed sequence of draws.
    pub struct FixedDelays(pub Vec<f64>);

    impl DelaySource for FixedDelays {
        fn draw(&mut self, count: usize) -> Vec<f64> {
            self.0.iter().copied().take(count).collect()
        }
    }

    /// Every draw returns the same value.
    pub struct ConstantDelay(pub f64);

    impl DelaySource for ConstantDelay {
        fn draw(&mut self, count: usize) -> Vec<f64> {
            vec![self.0; count]
        }
    }
}
