use crate::models::bar::DailyBar;
use crate::errors::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Base trait for daily market data sources
#[async_trait]
pub trait MarketDataSource {
    /// Name used in logs
    fn source_name(&self) -> &'static str;

    /// Fetch daily bars for `ticker` between `start` and `end`, both inclusive.
    /// Returns bars in ascending date order with one bar per trading day;
    /// an unknown ticker yields an empty series rather than an error.
    async fn fetch_daily_bars(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>>;
}
