//! Latency simulation defaults

pub struct SimulationConfig {
    // Mean of the per-row delay, in seconds
    pub mean_latency_secs: f64,
    // Standard deviation of the per-row delay, in seconds
    pub std_latency_secs: f64,
    // Multiplier applied to the delay of high-volume rows
    pub volume_factor: f64,
    // Rows with volume strictly above this percentile (0-100) count as high volume
    pub volume_threshold_percentile: f64,
    // Number of bars in the latency histogram
    pub histogram_bins: usize,
}

pub const SIMULATION: SimulationConfig = SimulationConfig {
    mean_latency_secs: 86_400.0, // 24 hours
    std_latency_secs: 3_600.0,   // 1 hour
    volume_factor: 1.24,
    volume_threshold_percentile: 75.0, // Top 25% of volume counts as "high volume"
    histogram_bins: 30,
};
