use anyhow::{Result, anyhow};
use clap::Parser;
use eframe::{NativeOptions, egui};
use tokio::runtime::Runtime;

use latency_crossover::analysis::{GaussianDelays, LatencySummary};
use latency_crossover::config::plot::PLOT_CONFIG;
use latency_crossover::data::write_series_async;
use latency_crossover::ui::config::UI_TEXT;
use latency_crossover::ui::console::print_report;
use latency_crossover::{
    Cli, PlotData, apply_latency, detect_crossovers, fetch_series, run_app,
};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);
    let params = args.latency_params();
    params.validate()?;

    // C. Data Loading (Blocking)
    let rt = Runtime::new()?;
    let (series, signature) = rt.block_on(fetch_series(&args))?;

    // D. Cache Write. Finished before the GUI takes over the main thread
    if let Err(e) = rt.block_on(write_series_async(
        signature,
        args.series_request(),
        series.clone(),
    )) {
        log::error!("Failed to write cache: {:#}", e);
    }

    // E. Simulate and detect
    let mut delays = GaussianDelays::from_params(&params, args.seed)?;
    let (simulated, latencies) = apply_latency(series, &params, &mut delays)?;
    let crossovers = detect_crossovers(&simulated);

    // F. Report
    let summary = LatencySummary::new(&simulated, &latencies);
    print_report(&crossovers, &summary);

    if args.no_plot {
        return Ok(());
    }
    if simulated.is_empty() {
        log::warn!("{}", UI_TEXT.empty_series);
        return Ok(());
    }

    // G. Run Native App
    let plot_data = PlotData::new(&simulated, &latencies, &crossovers, &params, args.bins);
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(PLOT_CONFIG.window_size),
        ..Default::default()
    };

    eframe::run_native(
        UI_TEXT.window_title,
        options,
        Box::new(move |cc| Ok(run_app(cc, plot_data))),
    )
    .map_err(|e| anyhow!("Chart window failed: {}", e))
}
