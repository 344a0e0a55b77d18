// Std library crates
use std::collections::HashSet;
use std::error::Error;
use std::fmt;
use std::time::SystemTime;

// External crates
use anyhow::{Result, anyhow, bail};
use binance_sdk::common::models::Interval as binance_interval;
use binance_sdk::config::ConfigurationRestApi;
use binance_sdk::models::RestApiRateLimit;
use binance_sdk::spot::{
    SpotRestApi,
    rest_api::{KlinesIntervalEnum, KlinesItemInner, KlinesParams, RestApi},
};
use binance_sdk::{errors, errors::ConnectorError as connection_error};
use tokio::time::{Duration, sleep};

// Local crates
use crate::config::binance::{BINANCE, BinanceApiConfig};
#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::domain::SeriesRequest;
use crate::utils::TimeUtils;

// "MS -> Enum", returning Result instead of panicking.
pub fn try_interval_from_ms(ms: i64) -> Result<KlinesIntervalEnum, String> {
    match ms {
        TimeUtils::MS_IN_H => Ok(KlinesIntervalEnum::Interval1h),
        TimeUtils::MS_IN_4_H => Ok(KlinesIntervalEnum::Interval4h),
        TimeUtils::MS_IN_12_H => Ok(KlinesIntervalEnum::Interval12h),
        TimeUtils::MS_IN_D => Ok(KlinesIntervalEnum::Interval1d),
        TimeUtils::MS_IN_W => Ok(KlinesIntervalEnum::Interval1w),
        _ => Err(format!("Unsupported interval: {}ms", ms)),
    }
}

#[derive(Debug)]
pub struct AllValidKlines {
    // Klines in ascending open-time order, plus what was requested
    pub klines: Vec<BNKline>,
    pub request: SeriesRequest,
}

impl AllValidKlines {
    pub fn new(klines: Vec<BNKline>, request: SeriesRequest) -> Self {
        AllValidKlines { klines, request }
    }
}

#[derive(Debug)]
#[allow(dead_code)]
#[derive(PartialOrd, PartialEq)]
pub struct BNKline {
    pub open_timestamp_ms: i64, // only necessary field. All others are optional
    pub open_price: Option<f64>,
    pub high_price: Option<f64>,
    pub low_price: Option<f64>,
    pub close_price: Option<f64>,
    pub base_asset_volume: Option<f64>,
    pub quote_asset_volume: Option<f64>,
}

// Custom error type for BNKline for better error messages.
#[derive(Debug)]
pub enum BNKlineError {
    InvalidLength,
    InvalidType(String),
    ConnectionFailed(String),
}

impl fmt::Display for BNKlineError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BNKlineError::InvalidLength => write!(f, "Invalid length"),
            BNKlineError::InvalidType(string) => write!(f, "Invalid type: {}", string),
            BNKlineError::ConnectionFailed(msg) => {
                write!(f, "Binance API connection failed: {}.", msg)
            }
        }
    }
}

impl Error for BNKlineError {}

/// Some(f64) only for the String variant holding a parseable number.
fn convert_kline_item_inner_enum_string_to_float(kline: Option<KlinesItemInner>) -> Option<f64> {
    kline.and_then(|inner| {
        if let KlinesItemInner::String(s) = inner {
            s.parse::<f64>().ok()
        } else {
            None
        }
    })
}

impl TryFrom<Vec<KlinesItemInner>> for BNKline {
    type Error = BNKlineError;

    fn try_from(vec_inner_klines: Vec<KlinesItemInner>) -> Result<Self, Self::Error> {
        let mut items = vec_inner_klines.into_iter();
        let open_timestamp_ms = match items.next().ok_or(BNKlineError::InvalidLength)? {
            KlinesItemInner::Integer(a) => a,
            _ => return Err(BNKlineError::InvalidType("open_time".to_string())),
        };

        let open_price = convert_kline_item_inner_enum_string_to_float(items.next());
        let high_price = convert_kline_item_inner_enum_string_to_float(items.next());
        let low_price = convert_kline_item_inner_enum_string_to_float(items.next());
        let close_price = convert_kline_item_inner_enum_string_to_float(items.next());
        let volume = convert_kline_item_inner_enum_string_to_float(items.next());
        let _ = items.next(); // close_time
        let quote_asset_volume = convert_kline_item_inner_enum_string_to_float(items.next());

        Ok(BNKline {
            open_timestamp_ms,
            open_price,
            high_price,
            low_price,
            close_price,
            base_asset_volume: volume,
            quote_asset_volume,
        })
    }
}

fn convert_klines(data: Vec<Vec<KlinesItemInner>>) -> Result<Vec<BNKline>, BNKlineError> {
    data.into_iter().map(Vec::try_into).collect()
}

async fn configure_binance_client() -> Result<RestApi, anyhow::Error> {
    let config = BinanceApiConfig::default();
    let rest_conf = ConfigurationRestApi::builder()
        .timeout(config.timeout_ms)
        .retries(config.retries)
        .backoff(config.backoff_ms)
        .build()?;
    // Create the Spot REST API client
    let rest_client = SpotRestApi::production(rest_conf);
    Ok(rest_client)
}

async fn handle_rate_limits(
    rate_limits: &Option<Vec<RestApiRateLimit>>,
    _request: &SeriesRequest,
    #[cfg(debug_assertions)] page_count: u32,
) -> Result<(), anyhow::Error> {
    #[cfg(not(debug_assertions))]
    let _ = &_request;

    if let Some(value) = rate_limits {
        for rate_limit in value {
            if rate_limit.interval_num == 1 && rate_limit.interval == binance_interval::Minute {
                let current_weight = rate_limit.count;
                let required_headroom = BINANCE
                    .limits
                    .weight_limit_minute
                    .saturating_sub(BINANCE.limits.kline_call_weight);
                #[cfg(debug_assertions)]
                if page_count.is_multiple_of(BINANCE.debug_print_interval) {
                    log::info!(
                        "Binance min-weight: {} (headroom: {})",
                        current_weight,
                        required_headroom
                    );
                }
                if current_weight > required_headroom {
                    // Sleep until the start of the next minute
                    let duration_since_epoch = SystemTime::now()
                        .duration_since(SystemTime::UNIX_EPOCH)
                        .map_err(|e| anyhow!("System clock is before the Unix epoch: {}", e))?;
                    let secs_into_min = duration_since_epoch.as_secs() % 60;
                    let sleep_duration = Duration::from_secs(60 - secs_into_min);

                    log::warn!(
                        "{} Current weight ({}) > required headroom ({}), sleeping for {:?}",
                        _request,
                        current_weight,
                        required_headroom,
                        sleep_duration
                    );
                    sleep(sleep_duration).await;
                }
            }
        }
    }
    Ok(())
}

/// Append a page of klines. Returns the next start time (None when the range is
/// exhausted) and whether this page was the last one.
fn process_new_klines(
    new_klines: Vec<Vec<KlinesItemInner>>,
    limit_klines_returned: i32,
    all_klines: &mut Vec<BNKline>,
    request: &SeriesRequest,
) -> Result<(Option<i64>, bool), anyhow::Error> {
    let bn_klines = convert_klines(new_klines).map_err(|e| {
        anyhow::Error::new(e).context(format!("{} convert_klines failed", request))
    })?;

    let Some(last) = bn_klines.last() else {
        return Ok((None, true));
    };

    // Binance treats startTime as inclusive so resume just after the last open time
    let next_start = Some(last.open_timestamp_ms + 1);
    let read_all_klines = bn_klines.len() < limit_klines_returned as usize;

    if let (Some(prev), Some(first)) = (all_klines.last(), bn_klines.first()) {
        debug_assert!(prev.open_timestamp_ms < first.open_timestamp_ms);
    }

    all_klines.extend(bn_klines);
    Ok((next_start, read_all_klines))
}

async fn fetch_binance_klines_with_limits(
    rest_client: &RestApi,
    params: KlinesParams,
    request: &SeriesRequest,
) -> Result<(Option<Vec<RestApiRateLimit>>, Vec<Vec<KlinesItemInner>>), anyhow::Error> {
    let response_result = rest_client.klines(params).await;

    match response_result {
        Ok(r) => {
            let rate_limits = r.rate_limits.clone();
            let data = r.data().await?;
            Ok((rate_limits, data))
        }
        Err(e) => {
            if let Some(conn_err) = e.downcast_ref::<errors::ConnectorError>() {
                match conn_err {
                    connection_error::ConnectorClientError(msg) => {
                        log::error!(
                            "{} Client error: Check your request parameters. {}",
                            request,
                            msg
                        );
                    }
                    connection_error::TooManyRequestsError(msg) => {
                        log::error!("{} Rate limit exceeded. {}", request, msg);
                    }
                    connection_error::RateLimitBanError(msg) => {
                        log::error!(
                            "{} IP address banned due to excessive rate limits. {}",
                            request,
                            msg
                        );
                    }
                    errors::ConnectorError::ServerError { msg, status_code } => {
                        log::error!(
                            "{} Server error: {} (status code: {:?})",
                            request,
                            msg,
                            status_code
                        );
                    }
                    errors::ConnectorError::NetworkError(msg) => {
                        log::error!(
                            "{} Network error: Check your internet connection. {}",
                            request,
                            msg
                        );
                    }
                    errors::ConnectorError::NotFoundError(msg) => {
                        log::error!("{} Resource not found. {}", request, msg);
                    }
                    connection_error::BadRequestError(msg) => {
                        log::error!(
                            "{} Bad request: is {} a valid Binance spot symbol? {}",
                            request,
                            request.bn_name(),
                            msg
                        );
                    }
                    other => {
                        log::error!("Unexpected ConnectionError variant: {:?}", other);
                    }
                }
                Err(
                    anyhow::Error::new(BNKlineError::ConnectionFailed(conn_err.to_string()))
                        .context(format!("Binance API call failed for {}", request)),
                )
            } else {
                log::error!("An unexpected error occurred for {}: {:#}", request, e);
                Err(
                    anyhow::Error::new(BNKlineError::ConnectionFailed(e.to_string()))
                        .context(format!("Unexpected error during API call for {}", request)),
                )
            }
        }
    }
}

/// Download every kline in `[request.start, request.end)`, paging forward.
pub async fn load_klines(request: &SeriesRequest) -> Result<AllValidKlines, anyhow::Error> {
    if request.is_empty_range() {
        bail!("{}: end date must come after start date", request);
    }
    let rest_client = configure_binance_client().await?;

    let limit_klines_returned = BINANCE.limits.klines_limit;
    let end_time = Some(request.last_ms());
    let mut start_time = Some(request.start_ms());
    let mut all_klines: Vec<BNKline> = Vec::new();
    #[cfg(debug_assertions)]
    let mut page_count = 0;

    while let Some(page_start) = start_time {
        if page_start > request.last_ms() {
            break;
        }
        let params = KlinesParams::builder(
            request.bn_name().to_string(),
            try_interval_from_ms(request.interval_ms).map_err(|e| anyhow!(e))?,
        )
        .limit(limit_klines_returned)
        .start_time(start_time)
        .end_time(end_time)
        .build()?;

        let (rate_limits, new_klines) =
            fetch_binance_klines_with_limits(&rest_client, params, request).await?;

        handle_rate_limits(
            &rate_limits,
            request,
            #[cfg(debug_assertions)]
            page_count,
        )
        .await?;

        let (next_start, batch_read_all) =
            process_new_klines(new_klines, limit_klines_returned, &mut all_klines, request)?;

        #[cfg(debug_assertions)]
        {
            if DEBUG_FLAGS.print_fetch_progress {
                log::info!(
                    "{} page {}: {} klines so far",
                    request,
                    page_count,
                    all_klines.len()
                );
            }
            page_count += 1;
        }

        if batch_read_all {
            break;
        }
        start_time = next_start;
    }

    if all_klines.is_empty() {
        bail!("Binance returned no klines for {}", request);
    }
    if has_duplicate_kline_open_time(&all_klines) {
        bail!(
            "has_duplicate_kline_open_time() failed for {} so bailing load_klines()!",
            request
        );
    }
    Ok(AllValidKlines::new(all_klines, request.clone()))
}

fn has_duplicate_kline_open_time(klines: &[BNKline]) -> bool {
    // Checks whether kline.open_time is duplicated anywhere in the `klines` slice
    let mut seen_ids = HashSet::new();
    for kline in klines {
        if !seen_ids.insert(kline.open_timestamp_ms) {
            return true;
        }
    }
    false
}
