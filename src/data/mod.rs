// Data loading and caching
pub mod pre_main_async;
pub mod timeseries;

// Re-export commonly used types
pub use pre_main_async::fetch_series;
pub use timeseries::serde_version::write_series_async;
