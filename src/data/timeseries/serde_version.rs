#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::config::PERSISTENCE;
use crate::utils::time_utils::{date_to_epoch_ms, how_many_seconds_ago};
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::data::timeseries::bnapi_version::BNAPI_SIGNATURE;
use crate::data::timeseries::{CreateOhlcvSeries, cache_file::CacheFile};
use crate::domain::SeriesRequest;
use crate::models::OhlcvSeries;

pub fn check_local_data_validity(
    request: &SeriesRequest,
    recency_required_secs: i64,
    version_required: f64,
) -> Result<()> {
    check_cache_file_validity(
        &CacheFile::default_cache_path(request),
        request,
        recency_required_secs,
        version_required,
    )
}

pub fn check_cache_file_validity(
    full_path: &Path,
    request: &SeriesRequest,
    recency_required_secs: i64,
    version_required: f64,
) -> Result<()> {
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_serde {
        log::info!("Checking validity of local cache at {:?}...", full_path);
    }
    let cache = CacheFile::load_from_path(full_path)?;

    // Check version
    if cache.version != version_required {
        bail!(
            "Cache version mismatch: file v{} vs required v{}",
            cache.version,
            version_required
        );
    }

    // Check it holds what we asked for
    if &cache.request != request {
        bail!(
            "Cache request mismatch: file has {}, expected {}",
            cache.request,
            request
        );
    }

    // A range that had already closed when cached never goes stale
    if cache.timestamp_ms < date_to_epoch_ms(request.end) {
        let seconds_ago = how_many_seconds_ago(cache.timestamp_ms);
        if seconds_ago > recency_required_secs {
            bail!(
                "Cache too old: created {} seconds ago (limit: {} seconds)",
                seconds_ago,
                recency_required_secs
            );
        }
    }

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_serde {
        log::info!(
            "✅ Cache valid: v{}, {} rows for {}",
            cache.version,
            cache.data.len(),
            cache.request
        );
    }

    Ok(())
}

/// Write a downloaded series to its binary cache file.
/// Only API data is written; data that came from the cache is left alone.
pub fn write_series_locally(
    series_signature: &'static str,
    request: &SeriesRequest,
    series: &OhlcvSeries,
) -> Result<()> {
    write_series_to_path(
        series_signature,
        request,
        series,
        &CacheFile::default_cache_path(request),
    )
}

pub fn write_series_to_path(
    series_signature: &'static str,
    request: &SeriesRequest,
    series: &OhlcvSeries,
    full_path: &Path,
) -> Result<()> {
    if series_signature != BNAPI_SIGNATURE {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_serde {
            log::info!("Skipping cache write (data not from Binance API)");
        }
        return Ok(());
    }

    #[cfg(debug_assertions)]
    let start_time = DEBUG_FLAGS.print_serde.then(|| {
        log::info!("Writing cache to disk: {:?}...", full_path);
        std::time::Instant::now()
    });

    let cache = CacheFile::new(request.clone(), series.clone(), PERSISTENCE.series.version);
    cache.save_to_path(full_path)?;

    #[cfg(debug_assertions)]
    if let Some(start) = start_time {
        log::info!(
            "✅ Cache written: {:?} ({} rows in {:.3}s)",
            full_path,
            series.len(),
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

/// Async wrapper for write_series_locally
pub async fn write_series_async(
    series_signature: &'static str,
    request: SeriesRequest,
    series: OhlcvSeries,
) -> Result<()> {
    tokio::task::spawn_blocking(move || write_series_locally(series_signature, &request, &series))
        .await
        .context("Cache write task panicked")?
}

pub struct SerdeVersion {
    pub directory: PathBuf,
}

impl Default for SerdeVersion {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(PERSISTENCE.series.directory),
        }
    }
}

#[async_trait]
impl CreateOhlcvSeries for SerdeVersion {
    fn signature(&self) -> &'static str {
        "Local Cache"
    }

    async fn create_series(&self, request: &SeriesRequest) -> Result<OhlcvSeries> {
        let full_path = self
            .directory
            .join(crate::config::series_cache_filename(request));

        let cache = tokio::task::spawn_blocking(move || CacheFile::load_from_path(&full_path))
            .await
            .context("Deserialization task panicked")?
            .context("Failed to load cache file")?;

        if &cache.request != request {
            bail!("Cache holds {} but {} was requested", cache.request, request);
        }

        // Re-check row order; the file may have been written by an older build
        let data = cache.data;
        let series = OhlcvSeries::new(
            data.symbol().to_string(),
            data.interval_ms(),
            data.observations().to_vec(),
        )?;
        log::info!("Loaded {} rows for {} from local cache", series.len(), request);
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::series_cache_filename;
    use crate::models::timeseries::test_support::daily_series;
    use crate::utils::TimeUtils;
    use chrono::NaiveDate;

    fn request(end_day: u32) -> SeriesRequest {
        SeriesRequest::new(
            "BTCUSDT",
            TimeUtils::MS_IN_D,
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2022, 1, end_day).unwrap(),
        )
    }

    #[test]
    fn test_validity_checks_request_and_version() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(4);
        let path = dir.path().join(series_cache_filename(&req));
        write_series_to_path(BNAPI_SIGNATURE, &req, &daily_series(&[1.0, 2.0, 3.0]), &path).unwrap();

        assert!(check_cache_file_validity(&path, &req, 60, PERSISTENCE.series.version).is_ok());
        assert!(check_cache_file_validity(&path, &req, 60, 99.0).is_err());
        assert!(check_cache_file_validity(&path, &request(5), 60, PERSISTENCE.series.version).is_err());
    }

    #[test]
    fn test_only_api_data_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(3);
        let path = dir.path().join(series_cache_filename(&req));
        write_series_to_path("Local Cache", &req, &daily_series(&[1.0, 2.0]), &path).unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_reads_back_written_series() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(4);
        let series = daily_series(&[1.0, 2.0, 3.0]);
        let path = dir.path().join(series_cache_filename(&req));
        write_series_to_path(BNAPI_SIGNATURE, &req, &series, &path).unwrap();

        let provider = SerdeVersion {
            directory: dir.path().to_path_buf(),
        };
        let loaded = provider.create_series(&req).await.unwrap();
        assert_eq!(loaded, series);
        assert!(provider.create_series(&request(5)).await.is_err());
    }
}
