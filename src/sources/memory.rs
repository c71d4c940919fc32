use crate::errors::Result;
use crate::models::bar::DailyBar;
use crate::sources::base::MarketDataSource;
use crate::util;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

/// 内存数据源，按代码保存完整的日线序列
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    series: HashMap<String, Vec<DailyBar>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, ticker: &str, bars: Vec<DailyBar>) -> Self {
        self.insert(ticker, bars);
        self
    }

    pub fn insert(&mut self, ticker: &str, bars: Vec<DailyBar>) {
        self.series.insert(ticker.to_uppercase(), bars);
    }
}

#[async_trait]
impl MarketDataSource for InMemorySource {
    fn source_name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_daily_bars(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>> {
        let bars = self
            .series
            .get(&ticker.to_uppercase())
            .cloned()
            .unwrap_or_default();
        Ok(util::normalize_series(bars, start, end, ticker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_filters_window() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
        let source = InMemorySource::new().with_series(
            "aapl",
            vec![
                DailyBar::new(d(1), 1.0, 1.0, 1.0, 1.0, 10.0),
                DailyBar::new(d(2), 1.0, 1.0, 1.0, 2.0, 10.0),
                DailyBar::new(d(5), 1.0, 1.0, 1.0, 3.0, 10.0),
            ],
        );

        let bars = source.fetch_daily_bars("AAPL", d(2), d(5)).await.unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, d(2));

        let missing = source.fetch_daily_bars("MSFT", d(1), d(5)).await.unwrap();
        assert!(missing.is_empty());
    }
}
