use eframe::egui;
use egui_plot::{AxisHints, Corner, HPlacement, Legend, Plot};

use crate::ui::app::PlotData;
use crate::ui::config::UI_TEXT;
use crate::ui::plot_layers::{
    CrossoverLayer, HistogramLayer, LayerContext, OriginalPriceLayer, PlotLayer,
    SimulatedPriceLayer,
};
use crate::ui::utils::format_price;
use crate::utils::time_utils::epoch_days_to_date_string;

/// Close price on original timestamps vs. close price on simulated timestamps.
pub fn show_price_plot(ui: &mut egui::Ui, data: &PlotData, height: f32) {
    let symbol = data.symbol.clone();
    Plot::new("price_plot")
        .height(height)
        .legend(Legend::default().position(Corner::LeftTop))
        .custom_x_axes(vec![create_date_axis()])
        .custom_y_axes(vec![create_price_axis(&symbol)])
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!(
                    "{}\n{}\n{}",
                    name,
                    epoch_days_to_date_string(value.x),
                    format_price(value.y)
                )
            }
        })
        .show(ui, |plot_ui| {
            let ctx = LayerContext { data };

            // Back to front
            let layers: Vec<Box<dyn PlotLayer>> = vec![
                Box::new(OriginalPriceLayer),
                Box::new(SimulatedPriceLayer),
                Box::new(CrossoverLayer),
            ];
            for layer in layers {
                layer.render(plot_ui, &ctx);
            }
        });
}

/// Histogram of the applied delays in hours.
pub fn show_latency_histogram(ui: &mut egui::Ui, data: &PlotData, height: f32) {
    Plot::new("latency_histogram")
        .height(height)
        .legend(Legend::default().position(Corner::RightTop))
        .custom_x_axes(vec![
            AxisHints::new_x()
                .label(UI_TEXT.histogram_x_axis)
                .formatter(|grid_mark, _range| format!("{:.1}", grid_mark.value)),
        ])
        .custom_y_axes(vec![
            AxisHints::new_y()
                .label(UI_TEXT.histogram_y_axis)
                .formatter(|grid_mark, _range| format!("{:.0}", grid_mark.value))
                .placement(HPlacement::Left),
        ])
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            HistogramLayer.render(plot_ui, &LayerContext { data });
        });
}

fn create_date_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .label(UI_TEXT.price_x_axis)
        .formatter(|grid_mark, _range| epoch_days_to_date_string(grid_mark.value))
}

fn create_price_axis(symbol: &str) -> AxisHints<'static> {
    let label = format!("{}  {}", symbol, UI_TEXT.price_y_axis);
    AxisHints::new_y()
        .label(label)
        .formatter(|grid_mark, _range| format_price(grid_mark.value))
        .placement(HPlacement::Left)
}
