//! Plain-text report written to stdout.

use std::fmt::Write;

use crate::analysis::LatencySummary;
use crate::models::CrossoverPoint;
use crate::utils::TimeUtils;
use crate::utils::time_utils::{format_date, format_datetime};

pub fn crossover_headline(count: usize) -> String {
    format!("Number of Timestamp Crossovers Detected: {}", count)
}

/// Crossover rows as an aligned text table, one line per row in original order.
pub fn format_crossover_table(points: &[CrossoverPoint]) -> String {
    if points.is_empty() {
        return "Empty table: no crossover points".to_string();
    }

    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "{:>6}  {:<10}  {:>12}  {:>12}  {:>12}  {:>12}  {:>16}  {:<23}  {:>9}",
        "Index", "Date", "Open", "High", "Low", "Close", "Volume", "Simulated_Timestamp", "Overtake"
    );
    for point in points {
        let o = &point.observation;
        let overtake_hours =
            point.overtake().num_milliseconds() as f64 / TimeUtils::MS_IN_H as f64;
        let _ = writeln!(
            out,
            "{:>6}  {:<10}  {:>12.4}  {:>12.4}  {:>12.4}  {:>12.4}  {:>16.2}  {:<23}  {:>8.2}h",
            point.index,
            format_date(&o.timestamp),
            o.open_price,
            o.high_price,
            o.low_price,
            o.close_price,
            o.volume,
            format_datetime(&point.simulated_timestamp),
            overtake_hours,
        );
    }
    out
}

pub fn format_summary(summary: &LatencySummary) -> String {
    format!(
        "{} rows, volume threshold {:.2}, {} high-volume rows amplified, latency min/mean/max {:.2}h / {:.2}h / {:.2}h",
        summary.rows,
        summary.volume_threshold,
        summary.amplified_rows,
        summary.min_latency_hours,
        summary.mean_latency_hours,
        summary.max_latency_hours,
    )
}

pub fn print_report(points: &[CrossoverPoint], summary: &LatencySummary) {
    log::info!("{}", format_summary(summary));
    println!("{}", crossover_headline(points.len()));
    println!("{}", format_crossover_table(points));
}
