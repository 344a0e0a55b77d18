use std::fmt;

use crate::data::timeseries::bnapi_version::bn_kline::{AllValidKlines, BNKline};
use crate::domain::Observation;
use crate::models::{OhlcvSeries, SeriesError};
use crate::utils::time_utils::epoch_ms_to_datetime;

#[derive(Debug)]
pub enum KlineConversionError {
    MissingField {
        open_timestamp_ms: i64,
        field: &'static str,
    },
    InvalidTimestamp(i64),
    Series(SeriesError),
}

impl std::error::Error for KlineConversionError {}
impl fmt::Display for KlineConversionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KlineConversionError::MissingField {
                open_timestamp_ms,
                field,
            } => write!(
                f,
                "kline opening at {}ms has a missing or non-numeric {}",
                open_timestamp_ms, field
            ),
            KlineConversionError::InvalidTimestamp(ms) => {
                write!(f, "kline open time {}ms is out of range", ms)
            }
            KlineConversionError::Series(e) => write!(f, "{}", e),
        }
    }
}

impl From<SeriesError> for KlineConversionError {
    fn from(e: SeriesError) -> Self {
        KlineConversionError::Series(e)
    }
}

fn require(
    value: Option<f64>,
    open_timestamp_ms: i64,
    field: &'static str,
) -> Result<f64, KlineConversionError> {
    value.ok_or(KlineConversionError::MissingField {
        open_timestamp_ms,
        field,
    })
}

impl TryFrom<&BNKline> for Observation {
    type Error = KlineConversionError;

    fn try_from(kline: &BNKline) -> Result<Self, Self::Error> {
        let ts = kline.open_timestamp_ms;
        let timestamp =
            epoch_ms_to_datetime(ts).ok_or(KlineConversionError::InvalidTimestamp(ts))?;
        Ok(Observation::new(
            timestamp,
            require(kline.open_price, ts, "open price")?,
            require(kline.high_price, ts, "high price")?,
            require(kline.low_price, ts, "low price")?,
            require(kline.close_price, ts, "close price")?,
            require(kline.base_asset_volume, ts, "volume")?,
        ))
    }
}

/// Gaps are not filled: a kline with any missing field rejects the whole download.
impl TryFrom<AllValidKlines> for OhlcvSeries {
    type Error = KlineConversionError;

    fn try_from(klines: AllValidKlines) -> Result<Self, Self::Error> {
        let observations = klines
            .klines
            .iter()
            .map(Observation::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OhlcvSeries::new(
            klines.request.symbol.clone(),
            klines.request.interval_ms,
            observations,
        )?)
    }
}
