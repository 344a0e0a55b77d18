use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::{PERSISTENCE, series_cache_filename};
use crate::domain::SeriesRequest;
use crate::models::OhlcvSeries;

/// Serialized cache wrapper: one downloaded series plus what was asked for.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CacheFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub request: SeriesRequest,
    pub data: OhlcvSeries,
}

impl CacheFile {
    pub fn new(request: SeriesRequest, data: OhlcvSeries, version: f64) -> Self {
        Self {
            version,
            timestamp_ms: Utc::now().timestamp_millis(),
            request,
            data,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open cache file: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let cache = bincode::deserialize_from(&mut reader)
            .context(format!("Failed to deserialize cache: {:?}", path))?;
        Ok(cache)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .context(format!("Failed to serialize cache to: {}", path.display()))
    }

    pub fn default_cache_path(request: &SeriesRequest) -> PathBuf {
        PathBuf::from(PERSISTENCE.series.directory).join(series_cache_filename(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timeseries::test_support::daily_series;
    use chrono::NaiveDate;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let request = SeriesRequest::new(
            "BTCUSDT",
            crate::utils::TimeUtils::MS_IN_D,
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2022, 1, 4).unwrap(),
        );
        let path = dir.path().join("nested").join(series_cache_filename(&request));
        let series = daily_series(&[1.5, 2.5, 3.5]);

        CacheFile::new(request.clone(), series.clone(), 1.0)
            .save_to_path(&path)
            .unwrap();
        let loaded = CacheFile::load_from_path(&path).unwrap();

        assert_eq!(loaded.request, request);
        assert_eq!(loaded.data, series);
        assert_eq!(loaded.version, 1.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CacheFile::load_from_path(&dir.path().join("absent.bin")).is_err());
    }
}
