//! Configuration module for the latency crossover simulator.

pub mod binance;

mod debug; // Private because we have a public re-export. Forces files to use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod fetch;
pub mod persistence;
pub mod plot;
pub mod simulation;

// Re-export commonly used items
pub use binance::BINANCE;
pub use fetch::FETCH;
pub use persistence::{PERSISTENCE, series_cache_filename};
pub use simulation::SIMULATION;
