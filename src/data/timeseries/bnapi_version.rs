pub mod bn_kline;
pub mod raw_ohlcv;

use anyhow::Result;
use async_trait::async_trait;
use tokio::time::Instant;

use crate::data::timeseries::CreateOhlcvSeries;
use crate::domain::SeriesRequest;
use crate::models::OhlcvSeries;
pub use bn_kline::AllValidKlines;

#[cfg(debug_assertions)]
use crate::utils::time_utils;

pub const BNAPI_SIGNATURE: &str = "Binance API";

pub struct BNAPIVersion;
#[async_trait]
impl CreateOhlcvSeries for BNAPIVersion {
    fn signature(&self) -> &'static str {
        BNAPI_SIGNATURE
    }

    async fn create_series(&self, request: &SeriesRequest) -> Result<OhlcvSeries> {
        let start_time = Instant::now();

        let klines = bn_kline::load_klines(request).await?;
        log::info!(
            "{} Number of klines in Binance data is: {}",
            request,
            klines.klines.len()
        );
        let series = OhlcvSeries::try_from(klines)?;

        #[cfg(debug_assertions)]
        if let (Some(first), Some(last)) = (series.first_timestamp(), series.last_timestamp()) {
            log::info!(
                "{} (started on {}, ended on {}) with {} rows",
                request,
                time_utils::format_date(&first),
                time_utils::format_date(&last),
                series.len(),
            );
        }

        let elapsed_time = start_time.elapsed(); // Calculate the elapsed time
        log::info!("Binance download completed in: {:?}", elapsed_time);

        Ok(series)
    }
}
