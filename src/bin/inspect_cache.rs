use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use latency_crossover::Cli;
use latency_crossover::data::timeseries::cache_file::CacheFile;
use latency_crossover::utils::maths_utils;
use latency_crossover::utils::time_utils::{epoch_ms_to_datetime, format_date, format_datetime};

/// Print what a local series cache holds.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct InspectArgs {
    /// Cache file to read. Defaults to the file the main binary would use
    /// for the given symbol and range.
    #[arg(long)]
    path: Option<PathBuf>,

    #[command(flatten)]
    run: Cli,
}

fn main() -> Result<()> {
    let args = InspectArgs::parse();
    let path = args
        .path
        .unwrap_or_else(|| CacheFile::default_cache_path(&args.run.series_request()));

    let cache = CacheFile::load_from_path(&path)
        .with_context(|| format!("Failed to load cache {:?}", path))?;

    println!("File:     {}", path.display());
    println!("Version:  {}", cache.version);
    println!("Request:  {}", cache.request);
    match epoch_ms_to_datetime(cache.timestamp_ms) {
        Some(created) => println!("Created:  {}", format_datetime(&created)),
        None => println!("Created:  invalid timestamp {}", cache.timestamp_ms),
    }

    let series = &cache.data;
    println!("Rows:     {}", series.len());
    if let (Some(first), Some(last)) = (series.first_timestamp(), series.last_timestamp()) {
        println!("First:    {}", format_date(&first));
        println!("Last:     {}", format_date(&last));
    }
    if let Some((min, max)) = maths_utils::get_min_max(&series.volumes()) {
        println!("Volume:   {:.2} .. {:.2}", min, max);
    }
    if let Some((min, max)) = maths_utils::get_min_max(&series.close_prices()) {
        println!("Close:    {:.4} .. {:.4}", min, max);
    }
    Ok(())
}
