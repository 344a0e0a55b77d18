use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a daily OHLCV table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Observation {
    // Key of the row (open time of the trading day)
    pub timestamp: DateTime<Utc>,

    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,

    // Base asset volume
    pub volume: f64,
}

impl Observation {
    // A constructor for convenience
    pub fn new(
        timestamp: DateTime<Utc>,
        open_price: f64,
        high_price: f64,
        low_price: f64,
        close_price: f64,
        volume: f64,
    ) -> Self {
        Observation {
            timestamp,
            open_price,
            high_price,
            low_price,
            close_price,
            volume,
        }
    }
}
