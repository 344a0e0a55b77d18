// User interface components
pub mod app;
pub mod config;
pub mod console;
pub mod plot_layers;
pub mod plot_view;
pub mod styles;
pub mod utils;

// Re-export main app
pub use app::{LatencyApp, PlotData};
pub use config::UI_CONFIG;
