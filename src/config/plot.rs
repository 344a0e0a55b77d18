//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    pub original_price_color: Color32,
    pub simulated_price_color: Color32,
    pub crossover_color: Color32,
    pub histogram_fill_color: Color32,
    pub histogram_edge_color: Color32,
    /// Width of both price lines
    pub price_line_width: f32,
    /// Radius of the per-day markers on the price lines
    pub marker_radius: f32,
    /// Radius of the crossover highlight markers
    pub crossover_marker_radius: f32,
    /// Width of the bar outlines in the histogram
    pub histogram_edge_width: f32,
    /// Share of each histogram bin covered by its bar (0.0 - 1.0)
    pub histogram_bar_fill_pct: f64,
    /// Initial window size (width, height)
    pub window_size: [f32; 2],
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    original_price_color: Color32::from_rgb(31, 119, 180), // Blue
    simulated_price_color: Color32::from_rgb(255, 127, 14), // Orange
    crossover_color: Color32::from_rgb(214, 39, 40),       // Red
    // 70% opacity
    histogram_fill_color: Color32::from_rgba_premultiplied(22, 83, 126, 178),
    histogram_edge_color: Color32::BLACK,
    price_line_width: 1.5,
    marker_radius: 2.5,
    crossover_marker_radius: 5.0,
    histogram_edge_width: 1.0,
    histogram_bar_fill_pct: 1.0,
    window_size: [1400.0, 1000.0],
};
