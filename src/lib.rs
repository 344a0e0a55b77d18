#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use analysis::{LatencyParams, apply_latency, detect_crossovers};
pub use data::fetch_series;
pub use domain::{Observation, SeriesRequest};
pub use models::{CrossoverPoint, OhlcvSeries, SimulatedSeries};
pub use ui::{LatencyApp, PlotData};

use chrono::NaiveDate;
// CLI argument parsing
use clap::Parser;

use crate::config::{FETCH, SIMULATION};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Binance spot symbol to download
    #[arg(long, default_value = FETCH.default_symbol)]
    pub symbol: String,

    /// First day of the range (inclusive), YYYY-MM-DD
    #[arg(long, default_value = FETCH.default_start)]
    pub start: NaiveDate,

    /// Day after the last day of the range (exclusive), YYYY-MM-DD
    #[arg(long, default_value = FETCH.default_end)]
    pub end: NaiveDate,

    /// Mean injected latency in seconds
    #[arg(long, default_value_t = SIMULATION.mean_latency_secs, allow_negative_numbers = true)]
    pub mean_latency: f64,

    /// Standard deviation of the injected latency in seconds
    #[arg(long, default_value_t = SIMULATION.std_latency_secs)]
    pub std_latency: f64,

    /// Latency multiplier for high-volume days
    #[arg(long, default_value_t = SIMULATION.volume_factor, allow_negative_numbers = true)]
    pub volume_factor: f64,

    /// Days with volume strictly above this percentile (0-100) count as high volume
    #[arg(long, default_value_t = SIMULATION.volume_threshold_percentile)]
    pub volume_threshold_percentile: f64,

    /// Seed for the latency draws. Unseeded (different every run) when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of bars in the latency histogram
    #[arg(long, default_value_t = SIMULATION.histogram_bins)]
    pub bins: usize,

    /// Use API as primary source instead of the local cache
    #[arg(long, default_value_t = false)]
    pub prefer_api: bool,

    /// Ignore the local cache entirely
    #[arg(long, default_value_t = false)]
    pub no_cache: bool,

    /// Print the report only, without opening the chart window
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,
}

impl Cli {
    pub fn series_request(&self) -> SeriesRequest {
        SeriesRequest::new(self.symbol.clone(), FETCH.interval_ms, self.start, self.end)
    }

    pub fn latency_params(&self) -> LatencyParams {
        LatencyParams {
            mean_latency_secs: self.mean_latency,
            std_latency_secs: self.std_latency,
            volume_factor: self.volume_factor,
            volume_threshold_percentile: self.volume_threshold_percentile,
        }
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext, plot_data: PlotData) -> Box<dyn eframe::App> {
    let app = ui::LatencyApp::new(cc, plot_data);
    Box::new(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_match_config() {
        let cli = Cli::parse_from(["latency-crossover"]);
        assert_eq!(cli.symbol, FETCH.default_symbol);
        assert_eq!(cli.latency_params(), LatencyParams::default());
        assert_eq!(cli.bins, SIMULATION.histogram_bins);
        assert_eq!(cli.seed, None);
        let request = cli.series_request();
        assert_eq!(request.start.to_string(), FETCH.default_start);
        assert_eq!(request.end.to_string(), FETCH.default_end);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "latency-crossover",
            "--symbol",
            "ethusdt",
            "--start",
            "2023-03-01",
            "--end",
            "2023-04-01",
            "--mean-latency",
            "0",
            "--std-latency",
            "0",
            "--seed",
            "7",
            "--no-plot",
        ]);
        assert_eq!(cli.series_request().symbol, "ETHUSDT");
        assert_eq!(cli.latency_params().mean_latency_secs, 0.0);
        assert_eq!(cli.seed, Some(7));
        assert!(cli.no_plot);
    }
}
