use crate::config::Config;
use crate::errors::{BreakoutError, Result};
use crate::models::bar::DailyBar;
use crate::sources::base::MarketDataSource;
use crate::util;
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// 雅虎财经日线数据源（v8 chart 接口）
pub struct YahooSource {
    client: Client,
    base_url: String,
}

impl YahooSource {
    /// 创建新的雅虎财经数据源
    ///
    /// The client carries no timeout of its own; callers wrap the analysis
    /// in whatever deadline they need.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(BreakoutError::RequestError)?;

        Ok(Self {
            client,
            base_url: config.yahoo_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn epoch_seconds(date: NaiveDate) -> i64 {
        date.and_hms_opt(0, 0, 0)
            .map(|dt| Utc.from_utc_datetime(&dt).timestamp())
            .unwrap_or_default()
    }

    /// Parses a chart response body into bars, dated in the exchange's own
    /// calendar. An absent result means the symbol is unknown.
    pub fn parse_chart(json: &Value) -> Result<Vec<DailyBar>> {
        let chart = &json["chart"];
        if let Some(code) = chart["error"]["code"].as_str() {
            if code.eq_ignore_ascii_case("Not Found") {
                return Ok(Vec::new());
            }
            let description = chart["error"]["description"].as_str().unwrap_or_default();
            return Err(BreakoutError::DataSourceError(format!(
                "Yahoo Finance error {}: {}",
                code, description
            )));
        }

        let result = &chart["result"][0];
        if result.is_null() {
            return Ok(Vec::new());
        }

        let timestamps = match result["timestamp"].as_array() {
            Some(ts) => ts,
            // 有效代码但区间内没有交易
            None => return Ok(Vec::new()),
        };

        let meta = &result["meta"];
        let tz: Option<Tz> = meta["exchangeTimezoneName"]
            .as_str()
            .and_then(|name| name.parse::<Tz>().ok());
        let gmt_offset = meta["gmtoffset"].as_i64().unwrap_or(0);

        let quote = &result["indicators"]["quote"][0];
        let field = |name: &str, i: usize| quote[name].get(i).and_then(|v| v.as_f64());
        // 复权收盘价：存在时按 adjclose/close 同比例调整开高低收
        let adjclose = &result["indicators"]["adjclose"][0]["adjclose"];
        let adjusted_close = |i: usize, close: f64| {
            adjclose
                .get(i)
                .and_then(|v| v.as_f64())
                .filter(|adj| adj.is_finite() && close != 0.0)
        };

        let mut bars = Vec::with_capacity(timestamps.len());
        let mut skipped = 0usize;

        for (i, ts) in timestamps.iter().enumerate() {
            let ts = match ts.as_i64() {
                Some(ts) => ts,
                None => {
                    skipped += 1;
                    continue;
                }
            };

            let date = match tz {
                Some(tz) => tz.timestamp_opt(ts, 0).single().map(|dt| dt.date_naive()),
                None => DateTime::from_timestamp(ts + gmt_offset, 0).map(|dt| dt.date_naive()),
            };

            let (date, close, volume) = match (date, field("close", i), field("volume", i)) {
                (Some(d), Some(c), Some(v)) => (d, c, v),
                _ => {
                    skipped += 1;
                    continue;
                }
            };

            let (factor, close_value) = match adjusted_close(i, close) {
                Some(adj) => (adj / close, adj),
                None => (1.0, close),
            };
            bars.push(DailyBar {
                date,
                open: field("open", i).unwrap_or(close) * factor,
                high: field("high", i).unwrap_or(close) * factor,
                low: field("low", i).unwrap_or(close) * factor,
                close: close_value,
                volume,
            });
        }

        if skipped > 0 {
            warn!("Skipped {} incomplete rows in Yahoo Finance response", skipped);
        }
        Ok(bars)
    }
}

#[async_trait]
impl MarketDataSource for YahooSource {
    fn source_name(&self) -> &'static str {
        "yahoo"
    }

    async fn fetch_daily_bars(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>> {
        // 两端各放宽一天以覆盖时区差，随后再按交易所日期精确截取
        let period1 = Self::epoch_seconds(start - Duration::days(1));
        let period2 = Self::epoch_seconds(end + Duration::days(2));
        info!("获取 {} 日线数据: {} ~ {}", ticker, start, end);

        let response = self
            .client
            .get(format!("{}/v8/finance/chart/{}", self.base_url, ticker))
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await
            .map_err(BreakoutError::RequestError)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Yahoo Finance returned 404 for {}", ticker);
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(BreakoutError::DataSourceError(format!(
                "Yahoo Finance request failed: HTTP status {}",
                status
            )));
        }

        let json: Value = response.json().await?;
        let bars = Self::parse_chart(&json)?;
        debug!("获取到 {} 条K线记录", bars.len());

        Ok(util::normalize_series(bars, start, end, ticker))
    }
}
