// Async code to run in main before the report and the GUI

use anyhow::Result;

use crate::Cli;
use crate::config::{BINANCE, PERSISTENCE};
use crate::data::timeseries::bnapi_version::BNAPIVersion;
use crate::data::timeseries::serde_version::{SerdeVersion, check_local_data_validity};
use crate::data::timeseries::{CreateOhlcvSeries, get_series_async};
use crate::domain::SeriesRequest;
use crate::models::OhlcvSeries;

/// Work out which providers to try, in order.
pub fn select_providers(
    request: &SeriesRequest,
    args: &Cli,
) -> Vec<Box<dyn CreateOhlcvSeries + Send + Sync>> {
    if args.no_cache {
        return vec![Box::new(BNAPIVersion)];
    }
    // If `check_local_data_validity` fails the only choice is the API,
    // otherwise both are available and the user picks the order via cli
    match (
        args.prefer_api,
        check_local_data_validity(
            request,
            BINANCE.limits.kline_acceptable_age_sec,
            PERSISTENCE.series.version,
        ),
    ) {
        (false, Ok(_)) => vec![Box::new(SerdeVersion::default()), Box::new(BNAPIVersion)], // local first
        (true, Ok(_)) => vec![Box::new(BNAPIVersion), Box::new(SerdeVersion::default())], // API first
        (_, Err(e)) => {
            log::info!("Local cache not usable: {:#}", e);
            log::info!("Downloading from Binance API...");
            vec![Box::new(BNAPIVersion)] // API only
        }
    }
}

/// Fetch the daily table for the request described by `args`.
/// Any failure here is fatal to the run.
pub async fn fetch_series(args: &Cli) -> Result<(OhlcvSeries, &'static str)> {
    let request = args.series_request();
    let providers = select_providers(&request, args);
    let (series, signature) = get_series_async(&providers, &request).await?;
    log::info!(
        "Retrieved {} rows for {} using: {}",
        series.len(),
        request,
        signature
    );
    Ok((series, signature))
}
