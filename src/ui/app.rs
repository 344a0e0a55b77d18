use eframe::{Frame, egui};

use crate::analysis::{Histogram, LatencyParams, LatencySummary};
use crate::models::{CrossoverPoint, SimulatedSeries};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::plot_view::{show_latency_histogram, show_price_plot};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{format_hours, format_price, setup_custom_visuals};
use crate::utils::TimeUtils;
use crate::utils::time_utils::datetime_to_epoch_days;

/// Everything the window draws, precomputed once before the event loop starts.
#[derive(Debug, Clone)]
pub struct PlotData {
    pub title: String,
    pub symbol: String,
    pub simulated_label: String,
    /// (epoch days, close) on original timestamps
    pub original: Vec<[f64; 2]>,
    /// (epoch days, close) on simulated timestamps, in original row order
    pub simulated: Vec<[f64; 2]>,
    pub crossovers: Vec<[f64; 2]>,
    /// Applied delays in hours
    pub histogram: Histogram,
    pub summary: LatencySummary,
    pub crossover_count: usize,
}

impl PlotData {
    pub fn new(
        simulated: &SimulatedSeries,
        latencies: &[f64],
        crossovers: &[CrossoverPoint],
        params: &LatencyParams,
        bins: usize,
    ) -> Self {
        let mean_hours = params.mean_latency_secs / TimeUtils::SECS_IN_H;

        let mut original = Vec::with_capacity(simulated.len());
        let mut simulated_points = Vec::with_capacity(simulated.len());
        for row in simulated.rows() {
            let close = row.observation.close_price;
            original.push([datetime_to_epoch_days(&row.observation.timestamp), close]);
            simulated_points.push([datetime_to_epoch_days(&row.simulated_timestamp), close]);
        }

        // Highlighted where they landed, i.e. on the simulated timeline
        let crossover_points = crossovers
            .iter()
            .map(|p| {
                [
                    datetime_to_epoch_days(&p.simulated_timestamp),
                    p.observation.close_price,
                ]
            })
            .collect();

        let hours: Vec<f64> = latencies
            .iter()
            .map(|secs| secs / TimeUtils::SECS_IN_H)
            .collect();

        Self {
            title: format!(
                "Simulated Data with {:.0} Hours Gaussian Latency on Historical Data",
                mean_hours
            ),
            symbol: simulated.original().symbol().to_string(),
            simulated_label: format!("Simulated Data with {:.0} Hours Latency", mean_hours),
            original,
            simulated: simulated_points,
            crossovers: crossover_points,
            histogram: Histogram::from_values(&hours, bins),
            summary: LatencySummary::new(simulated, latencies),
            crossover_count: crossovers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}

pub struct LatencyApp {
    data: PlotData,
}

impl LatencyApp {
    pub fn new(cc: &eframe::CreationContext, data: PlotData) -> Self {
        setup_custom_visuals(&cc.egui_ctx);
        Self { data }
    }

    fn render_summary_panel(&self, ctx: &egui::Context) {
        let summary = &self.data.summary;
        let color = UI_CONFIG.colors.label;
        egui::TopBottomPanel::top("summary_panel").show(ctx, |ui| {
            ui.label_header(&self.data.title);
            ui.horizontal_wrapped(|ui| {
                ui.metric("Symbol", &self.data.symbol, color);
                ui.separator();
                ui.metric("Rows", &summary.rows.to_string(), color);
                ui.separator();
                ui.metric(
                    "Crossovers",
                    &self.data.crossover_count.to_string(),
                    UI_CONFIG.colors.heading,
                );
                ui.separator();
                ui.metric("Volume threshold", &format!("{:.2}", summary.volume_threshold), color);
                ui.separator();
                ui.metric("Amplified", &summary.amplified_rows.to_string(), color);
                ui.separator();
                ui.metric("Min", &format_hours(summary.min_latency_hours), color);
                ui.metric("Mean", &format_hours(summary.mean_latency_hours), color);
                ui.metric("Max", &format_hours(summary.max_latency_hours), color);
            });
            if let Some(last) = self.data.original.last() {
                ui.label_subdued(format!("Last close {}", format_price(last[1])));
            }
        });
    }

    fn render_central_panel(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.data.is_empty() {
                ui.label_warning(UI_TEXT.empty_series);
                return;
            }

            // Price chart takes the larger share, histogram gets the rest
            let available = ui.available_height();
            let price_height = (available * 0.6).max(120.0);
            let histogram_height = (available - price_height - 40.0).max(100.0);

            show_price_plot(ui, &self.data, price_height);
            ui.separator();
            ui.label_subdued(UI_TEXT.histogram_title);
            show_latency_histogram(ui, &self.data, histogram_height);
        });
    }
}

impl eframe::App for LatencyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.render_summary_panel(ctx);
        self.render_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::latency::test_support::FixedDelays;
    use crate::analysis::{apply_latency, detect_crossovers};
    use crate::models::timeseries::test_support::daily_series;

    fn plot_data_for(volumes: &[f64], draws: Vec<f64>) -> PlotData {
        let params = LatencyParams {
            mean_latency_secs: 86_400.0,
            std_latency_secs: 3_600.0,
            volume_factor: 1.0,
            volume_threshold_percentile: 75.0,
        };
        let (simulated, latencies) =
            apply_latency(daily_series(volumes), &params, &mut FixedDelays(draws)).unwrap();
        let crossovers = detect_crossovers(&simulated);
        PlotData::new(&simulated, &latencies, &crossovers, &params, 10)
    }

    #[test]
    fn test_points_follow_row_order() {
        let data = plot_data_for(&[1.0, 1.0, 1.0], vec![0.0, 0.0, 0.0]);
        assert_eq!(data.original.len(), 3);
        assert_eq!(data.original, data.simulated);
        assert!(data.original.windows(2).all(|w| w[0][0] < w[1][0]));
        assert!(data.crossovers.is_empty());
        assert_eq!(data.symbol, "BTCUSDT");
    }

    #[test]
    fn test_crossover_plotted_at_simulated_time() {
        // Row 1 is pulled back two days, landing before row 0
        let data = plot_data_for(&[1.0, 1.0, 1.0], vec![0.0, -172_800.0, 0.0]);
        assert_eq!(data.crossover_count, 1);
        assert_eq!(data.crossovers.len(), 1);
        assert_eq!(data.crossovers[0], data.simulated[1]);
        assert!((data.original[1][0] - data.crossovers[0][0] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_in_hours() {
        let data = plot_data_for(&[1.0, 1.0], vec![3_600.0, 7_200.0]);
        assert_eq!(data.histogram.total(), 2);
        let first = data.histogram.bins.first().unwrap();
        let last = data.histogram.bins.last().unwrap();
        assert!((first.lower - 1.0).abs() < 1e-9);
        assert!((last.upper - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_titles_use_mean_hours() {
        let data = plot_data_for(&[1.0], vec![0.0]);
        assert_eq!(
            data.title,
            "Simulated Data with 24 Hours Gaussian Latency on Historical Data"
        );
        assert_eq!(data.simulated_label, "Simulated Data with 24 Hours Latency");
    }

    #[test]
    fn test_empty_series() {
        let data = plot_data_for(&[], vec![]);
        assert!(data.is_empty());
        assert!(data.histogram.is_empty());
        assert_eq!(data.crossover_count, 0);
    }
}
