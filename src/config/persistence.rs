//! File persistence and serialization configuration

use crate::domain::SeriesRequest;
use crate::utils::TimeUtils;

pub struct SeriesCacheConfig {
    /// Directory path for storing downloaded series
    pub directory: &'static str,
    /// Base filename for cache files (without extension)
    pub filename_without_ext: &'static str,
    /// Current version of the cache serialization format
    pub version: f64,
}

pub struct PersistenceConfig {
    pub series: SeriesCacheConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    series: SeriesCacheConfig {
        directory: "ohlcv_data",
        filename_without_ext: "ohlcv",
        version: 1.0,
    },
};

/// Generate request-specific cache filename
/// Example: "ohlcv_BTCUSDT_1d_2022-01-01_2023-01-01_v1.bin"
pub fn series_cache_filename(request: &SeriesRequest) -> String {
    format!(
        "{}_{}_{}_{}_{}_v{}.bin",
        PERSISTENCE.series.filename_without_ext,
        request.symbol,
        TimeUtils::interval_ms_to_string(request.interval_ms),
        request.start,
        request.end,
        PERSISTENCE.series.version
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_filename_identifies_request() {
        let request = SeriesRequest::new(
            "btcusdt",
            TimeUtils::MS_IN_D,
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        );
        assert_eq!(
            series_cache_filename(&request),
            "ohlcv_BTCUSDT_1d_2022-01-01_2023-01-01_v1.bin"
        );
    }
}
