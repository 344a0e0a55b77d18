// Data models for the simulation
pub mod simulated;
pub mod timeseries;

// Re-export commonly used types
pub use simulated::{CrossoverPoint, SimulatedRow, SimulatedSeries};
pub use timeseries::{OhlcvSeries, SeriesError};
