pub mod bnapi_version;
pub mod cache_file;
pub mod serde_version;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::domain::SeriesRequest;
use crate::models::OhlcvSeries;

#[async_trait]
pub trait CreateOhlcvSeries {
    // Either create a series OR return an anyhow::error
    async fn create_series(&self, request: &SeriesRequest) -> Result<OhlcvSeries>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Try each provider in turn and return the first series that loads.
pub async fn get_series_async(
    implementations: &[Box<dyn CreateOhlcvSeries + Send + Sync>],
    request: &SeriesRequest,
) -> Result<(OhlcvSeries, &'static str)> {
    let mut errors = Vec::new();
    for imp in implementations {
        match imp.create_series(request).await {
            Ok(series) => {
                let signature = imp.signature();
                return Ok((series, signature));
            }
            Err(e) => {
                log::info!("{} failed for {}: {:#}", imp.signature(), request, e);
                errors.push(format!("{}: {:#}", imp.signature(), e));
                // Continue to the next implementation
            }
        }
    }
    Err(anyhow!(
        "All data sources failed for {}: {}",
        request,
        errors.join("; ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timeseries::test_support::daily_series;
    use anyhow::bail;
    use chrono::NaiveDate;

    struct Failing;
    #[async_trait]
    impl CreateOhlcvSeries for Failing {
        async fn create_series(&self, _request: &SeriesRequest) -> Result<OhlcvSeries> {
            bail!("offline")
        }
        fn signature(&self) -> &'static str {
            "Failing"
        }
    }

    struct InMemory;
    #[async_trait]
    impl CreateOhlcvSeries for InMemory {
        async fn create_series(&self, _request: &SeriesRequest) -> Result<OhlcvSeries> {
            Ok(daily_series(&[1.0, 2.0]))
        }
        fn signature(&self) -> &'static str {
            "In Memory"
        }
    }

    fn request() -> SeriesRequest {
        SeriesRequest::new(
            "BTCUSDT",
            crate::utils::TimeUtils::MS_IN_D,
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2022, 1, 3).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_falls_through_to_next_provider() {
        let providers: Vec<Box<dyn CreateOhlcvSeries + Send + Sync>> =
            vec![Box::new(Failing), Box::new(InMemory)];
        let (series, signature) = get_series_async(&providers, &request()).await.unwrap();
        assert_eq!(signature, "In Memory");
        assert_eq!(series.len(), 2);
    }

    #[tokio::test]
    async fn test_all_failing_reports_every_error() {
        let providers: Vec<Box<dyn CreateOhlcvSeries + Send + Sync>> =
            vec![Box::new(Failing), Box::new(Failing)];
        let err = get_series_async(&providers, &request()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("BTCUSDT"));
        assert_eq!(message.matches("offline").count(), 2);
    }
}
