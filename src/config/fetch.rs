//! What to download when nothing is given on the command line

use crate::utils::TimeUtils;

pub struct FetchConfig {
    pub default_symbol: &'static str,
    // Inclusive, YYYY-MM-DD
    pub default_start: &'static str,
    // Exclusive, YYYY-MM-DD
    pub default_end: &'static str,
    // Daily candles only
    pub interval_ms: i64,
}

pub const FETCH: FetchConfig = FetchConfig {
    default_symbol: "BTCUSDT",
    default_start: "2022-01-01",
    default_end: "2023-01-01",
    interval_ms: TimeUtils::MS_IN_D,
};
