use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 日线数据结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl DailyBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// A bar together with the statistics derived from its trailing window.
///
/// `None` marks a value that is undefined at this position: the first
/// `window - 1` bars have no volume average, the first bar has no return,
/// and the ratio is missing wherever the average is missing or zero.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedBar {
    pub bar: DailyBar,
    pub volume_ma: Option<f64>,
    pub daily_return: Option<f64>,
    pub volume_ratio: Option<f64>,
}

impl EnrichedBar {
    pub fn date(&self) -> NaiveDate {
        self.bar.date
    }

    pub fn close(&self) -> f64 {
        self.bar.close
    }
}
