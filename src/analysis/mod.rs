// Latency injection and the analyses run on its output
pub mod crossover;
pub mod histogram;
pub mod latency;

// Re-export commonly used types
pub use crossover::detect_crossovers;
pub use histogram::{Histogram, HistogramBin};
pub use latency::{
    DelaySource, GaussianDelays, LatencyError, LatencyParams, LatencySummary, apply_latency,
};
