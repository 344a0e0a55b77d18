use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::TimeUtils;
use crate::utils::time_utils::date_to_epoch_ms;

/// What to download: one symbol, one interval, `[start, end)` in calendar days.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct SeriesRequest {
    pub symbol: String,
    pub interval_ms: i64,
    pub start: NaiveDate,
    // Exclusive
    pub end: NaiveDate,
}

impl SeriesRequest {
    pub fn new(symbol: impl Into<String>, interval_ms: i64, start: NaiveDate, end: NaiveDate) -> Self {
        SeriesRequest {
            symbol: symbol.into().trim().to_uppercase(),
            interval_ms,
            start,
            end,
        }
    }

    // The name we pass into the Binance API
    pub fn bn_name(&self) -> &str {
        &self.symbol
    }

    pub fn start_ms(&self) -> i64 {
        date_to_epoch_ms(self.start)
    }

    /// Last millisecond covered by the request (inclusive bound for the API).
    pub fn last_ms(&self) -> i64 {
        date_to_epoch_ms(self.end) - 1
    }

    pub fn is_empty_range(&self) -> bool {
        self.end <= self.start
    }
}

impl std::fmt::Display for SeriesRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {} [{} .. {})",
            self.symbol,
            TimeUtils::interval_ms_to_string(self.interval_ms),
            self.start,
            self.end,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_symbol_is_normalised() {
        let req = SeriesRequest::new(" btcusdt ", TimeUtils::MS_IN_D, date(2022, 1, 1), date(2022, 1, 3));
        assert_eq!(req.bn_name(), "BTCUSDT");
        assert_eq!(req.to_string(), "BTCUSDT 1d [2022-01-01 .. 2022-01-03)");
    }

    #[test]
    fn test_end_is_exclusive() {
        let req = SeriesRequest::new("ETHUSDT", TimeUtils::MS_IN_D, date(2022, 1, 1), date(2022, 1, 2));
        assert_eq!(req.last_ms() - req.start_ms(), TimeUtils::MS_IN_D - 1);
        assert!(!req.is_empty_range());
        let backwards = SeriesRequest::new("ETHUSDT", TimeUtils::MS_IN_D, date(2022, 1, 2), date(2022, 1, 2));
        assert!(backwards.is_empty_range());
    }
}
