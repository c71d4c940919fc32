use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{BreakoutError, Result};
use crate::util;

pub const DEFAULT_VOLUME_THRESHOLD: f64 = 200.0;
pub const DEFAULT_PRICE_THRESHOLD: f64 = 2.0;
pub const DEFAULT_HOLDING_PERIOD: usize = 10;

fn default_volume_threshold() -> f64 {
    DEFAULT_VOLUME_THRESHOLD
}

fn default_price_threshold() -> f64 {
    DEFAULT_PRICE_THRESHOLD
}

fn default_holding_period() -> i64 {
    DEFAULT_HOLDING_PERIOD as i64
}

/// 外部请求，日期为 ISO 字符串，阈值均为百分比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub ticker: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default = "default_volume_threshold")]
    pub volume_threshold: f64,
    #[serde(default = "default_price_threshold")]
    pub price_threshold: f64,
    #[serde(default = "default_holding_period")]
    pub holding_period: i64,
}

impl AnalysisRequest {
    pub fn new(ticker: &str, start_date: &str, end_date: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            volume_threshold: DEFAULT_VOLUME_THRESHOLD,
            price_threshold: DEFAULT_PRICE_THRESHOLD,
            holding_period: DEFAULT_HOLDING_PERIOD as i64,
        }
    }

    /// 校验并转换为类型化的分析参数
    pub fn into_params(self) -> Result<AnalysisParams> {
        let ticker = self.ticker.trim().to_string();
        if ticker.is_empty() {
            return Err(BreakoutError::InvalidParameter("ticker must not be empty".to_string()));
        }

        let start_date = util::parse_iso_date(&self.start_date)?;
        let end_date = util::parse_iso_date(&self.end_date)?;

        if self.holding_period < 1 {
            return Err(BreakoutError::InvalidParameter(format!(
                "holding_period must be a positive number of sessions, got {}",
                self.holding_period
            )));
        }

        let params = AnalysisParams {
            ticker,
            start_date,
            end_date,
            volume_threshold: self.volume_threshold,
            price_threshold: self.price_threshold,
            holding_period: self.holding_period as usize,
        };
        params.validate()?;
        Ok(params)
    }
}

/// Typed, validated inputs of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Volume ratio threshold in percent (200.0 means 2x the rolling average).
    pub volume_threshold: f64,
    /// Daily close-to-close return threshold in percent.
    pub price_threshold: f64,
    /// Number of trading sessions between entry and exit.
    pub holding_period: usize,
}

impl AnalysisParams {
    pub fn new(ticker: &str, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            ticker: ticker.to_string(),
            start_date,
            end_date,
            volume_threshold: DEFAULT_VOLUME_THRESHOLD,
            price_threshold: DEFAULT_PRICE_THRESHOLD,
            holding_period: DEFAULT_HOLDING_PERIOD,
        }
    }

    pub fn with_volume_threshold(mut self, pct: f64) -> Self {
        self.volume_threshold = pct;
        self
    }

    pub fn with_price_threshold(mut self, pct: f64) -> Self {
        self.price_threshold = pct;
        self
    }

    pub fn with_holding_period(mut self, sessions: usize) -> Self {
        self.holding_period = sessions;
        self
    }

    // 日期先后不在此处校验：起始晚于结束时按无数据处理
    pub fn validate(&self) -> Result<()> {
        if self.ticker.trim().is_empty() {
            return Err(BreakoutError::InvalidParameter("ticker must not be empty".to_string()));
        }
        if self.holding_period == 0 {
            return Err(BreakoutError::InvalidParameter(
                "holding_period must be at least one session".to_string(),
            ));
        }
        for (name, value) in [
            ("volume_threshold", self.volume_threshold),
            ("price_threshold", self.price_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BreakoutError::InvalidParameter(format!(
                    "{} must be a positive percentage, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn volume_ratio_cutoff(&self) -> f64 {
        self.volume_threshold / 100.0
    }

    pub fn daily_return_cutoff(&self) -> f64 {
        self.price_threshold / 100.0
    }
}
