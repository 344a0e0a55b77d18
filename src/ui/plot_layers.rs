use eframe::egui::Stroke;
use egui_plot::{Bar, BarChart, Line, LineStyle, MarkerShape, PlotPoints, PlotUi, Points};

use crate::config::plot::PLOT_CONFIG;
use crate::ui::app::PlotData;
use crate::ui::config::UI_TEXT;

/// Context passed to every layer during rendering.
pub struct LayerContext<'a> {
    pub data: &'a PlotData,
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// 1. ORIGINAL PRICE LAYER
// ============================================================================
pub struct OriginalPriceLayer;

impl PlotLayer for OriginalPriceLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let label = UI_TEXT.original_series_label;
        plot_ui.line(
            Line::new(label, PlotPoints::from(ctx.data.original.clone()))
                .color(PLOT_CONFIG.original_price_color)
                .width(PLOT_CONFIG.price_line_width),
        );
        plot_ui.points(
            Points::new(label, PlotPoints::from(ctx.data.original.clone()))
                .shape(MarkerShape::Circle)
                .filled(true)
                .radius(PLOT_CONFIG.marker_radius)
                .color(PLOT_CONFIG.original_price_color),
        );
    }
}

// ============================================================================
// 2. SIMULATED PRICE LAYER
// ============================================================================
pub struct SimulatedPriceLayer;

impl PlotLayer for SimulatedPriceLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let label = ctx.data.simulated_label.as_str();
        // Drawn in row order so crossovers show up as the line doubling back
        plot_ui.line(
            Line::new(label, PlotPoints::from(ctx.data.simulated.clone()))
                .color(PLOT_CONFIG.simulated_price_color)
                .width(PLOT_CONFIG.price_line_width)
                .style(LineStyle::dashed_loose()),
        );
        plot_ui.points(
            Points::new(label, PlotPoints::from(ctx.data.simulated.clone()))
                .shape(MarkerShape::Cross)
                .radius(PLOT_CONFIG.marker_radius)
                .color(PLOT_CONFIG.simulated_price_color),
        );
    }
}

// ============================================================================
// 3. CROSSOVER LAYER
// ============================================================================
pub struct CrossoverLayer;

impl PlotLayer for CrossoverLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if ctx.data.crossovers.is_empty() {
            return;
        }
        plot_ui.points(
            Points::new(
                UI_TEXT.crossover_label,
                PlotPoints::from(ctx.data.crossovers.clone()),
            )
            .shape(MarkerShape::Circle)
            .filled(false)
            .radius(PLOT_CONFIG.crossover_marker_radius)
            .color(PLOT_CONFIG.crossover_color),
        );
    }
}

// ============================================================================
// 4. LATENCY HISTOGRAM LAYER
// ============================================================================
pub struct HistogramLayer;

impl PlotLayer for HistogramLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let bars: Vec<Bar> = ctx
            .data
            .histogram
            .bins
            .iter()
            .map(|bin| {
                Bar::new(bin.center(), bin.count as f64)
                    .width(bin.width() * PLOT_CONFIG.histogram_bar_fill_pct)
                    .fill(PLOT_CONFIG.histogram_fill_color)
                    .stroke(Stroke::new(
                        PLOT_CONFIG.histogram_edge_width,
                        PLOT_CONFIG.histogram_edge_color,
                    ))
            })
            .collect();

        plot_ui.bar_chart(
            BarChart::new(UI_TEXT.histogram_series_label, bars)
                .color(PLOT_CONFIG.histogram_fill_color),
        );
    }
}
