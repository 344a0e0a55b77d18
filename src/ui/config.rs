use eframe::egui::Color32;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,     // This sets every label globally to this color
        heading: Color32::YELLOW, // Sets every heading
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(30, 30, 30),
        side_panel: Color32::from_rgb(25, 25, 25),
    },
};

/// Fixed strings shown in the window
pub struct UiText {
    pub window_title: &'static str,
    pub original_series_label: &'static str,
    pub crossover_label: &'static str,
    pub price_x_axis: &'static str,
    pub price_y_axis: &'static str,
    pub histogram_title: &'static str,
    pub histogram_series_label: &'static str,
    pub histogram_x_axis: &'static str,
    pub histogram_y_axis: &'static str,
    pub empty_series: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    window_title: "Latency Crossover",
    original_series_label: "Original",
    crossover_label: "Timestamp Crossovers",
    price_x_axis: "Date",
    price_y_axis: "Close",
    histogram_title: "Distribution of Latencies Added",
    histogram_series_label: "Latency",
    histogram_x_axis: "Latency (hours)",
    histogram_y_axis: "Frequency",
    empty_series: "No observations to plot",
};
