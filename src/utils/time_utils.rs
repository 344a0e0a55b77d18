use chrono::{DateTime, NaiveDate, TimeZone, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_4_H: i64 = Self::MS_IN_MIN * 60 * 4;
    pub const MS_IN_12_H: i64 = Self::MS_IN_MIN * 60 * 12;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const MS_IN_W: i64 = Self::MS_IN_D * 7;
    pub const SECS_IN_H: f64 = 3600.0;
    pub const SECS_IN_D: f64 = Self::SECS_IN_H * 24.0;
    pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d";
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

    /// Convert interval in milliseconds to a Binance-style shorthand (e.g. `1d`, `1h`).
    pub fn interval_ms_to_string(interval_ms: i64) -> &'static str {
        match interval_ms {
            Self::MS_IN_H => "1h",
            Self::MS_IN_4_H => "4h",
            Self::MS_IN_12_H => "12h",
            Self::MS_IN_D => "1d",
            Self::MS_IN_W => "1w",
            _ => "unknown",
        }
    }
}

/// Midnight UTC at the start of `date`, as epoch milliseconds.
pub fn date_to_epoch_ms(date: NaiveDate) -> i64 {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
        .timestamp_millis()
}

pub fn epoch_ms_to_datetime(epoch_ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(epoch_ms)
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format(TimeUtils::STANDARD_DATE_FORMAT).to_string()
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    // Used for display purposes
    dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

/// Fractional days since the Unix epoch. This is the x coordinate used by the plots.
pub fn datetime_to_epoch_days(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp_millis() as f64 / TimeUtils::MS_IN_D as f64
}

pub fn epoch_days_to_date_string(epoch_days: f64) -> String {
    let epoch_ms = (epoch_days * TimeUtils::MS_IN_D as f64).round() as i64;
    match epoch_ms_to_datetime(epoch_ms) {
        Some(dt) => format_date(&dt),
        None => String::new(),
    }
}

pub fn how_many_seconds_ago(past_timestamp_ms: i64) -> i64 {
    // How many seconds ago was the event described by `past_timestamp_ms` ?
    let now_timestamp_ms = Utc::now().timestamp_millis();
    (now_timestamp_ms - past_timestamp_ms) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_to_epoch_ms() {
        let date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        assert_eq!(date_to_epoch_ms(date), 1_640_995_200_000);
    }

    #[test]
    fn test_epoch_days_round_trip_formatting() {
        let dt = epoch_ms_to_datetime(1_640_995_200_000).unwrap();
        let days = datetime_to_epoch_days(&dt);
        assert_eq!(epoch_days_to_date_string(days), "2022-01-01");
    }

    #[test]
    fn test_interval_names() {
        assert_eq!(TimeUtils::interval_ms_to_string(TimeUtils::MS_IN_D), "1d");
        assert_eq!(TimeUtils::interval_ms_to_string(12345), "unknown");
    }
}
