use crate::errors::{BreakoutError, Result};
use crate::models::bar::DailyBar;
use crate::sources::base::MarketDataSource;
use crate::util;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 本地CSV数据源，文件格式与雅虎财经导出一致：
/// `Date,Open,High,Low,Close,Adj Close,Volume`（多余的列会被忽略）
///
/// 存在 `Adj Close` 时按复权比例调整开高低收，与雅虎接口数据源一致。
pub struct CsvFileSource {
    data_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open")]
    open: String,
    #[serde(rename = "High")]
    high: String,
    #[serde(rename = "Low")]
    low: String,
    #[serde(rename = "Close")]
    close: String,
    #[serde(rename = "Adj Close", default)]
    adj_close: Option<String>,
    #[serde(rename = "Volume")]
    volume: String,
}

impl CsvRow {
    fn into_bar(self) -> Option<DailyBar> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()?;
        let number = |s: &str| s.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        let close = number(&self.close)?;
        let (factor, close) = match self.adj_close.as_deref().and_then(number) {
            Some(adj) if close != 0.0 => (adj / close, adj),
            _ => (1.0, close),
        };
        Some(DailyBar {
            date,
            open: number(&self.open)? * factor,
            high: number(&self.high)? * factor,
            low: number(&self.low)? * factor,
            close,
            volume: number(&self.volume)?,
        })
    }
}

impl CsvFileSource {
    pub fn new(data_dir: &str) -> Self {
        Self {
            data_dir: PathBuf::from(data_dir),
        }
    }

    /// 获取指定代码的数据文件路径
    pub fn file_path(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", ticker.to_uppercase()))
    }

    pub fn parse_bars(content: &str, path: &Path) -> Result<Vec<DailyBar>> {
        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();
        let mut skipped = 0usize;

        for row in reader.deserialize::<CsvRow>() {
            let row = row?;
            match row.into_bar() {
                Some(bar) => bars.push(bar),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!("Skipped {} malformed rows in {}", skipped, path.display());
        }
        Ok(bars)
    }
}

#[async_trait]
impl MarketDataSource for CsvFileSource {
    fn source_name(&self) -> &'static str {
        "csv"
    }

    async fn fetch_daily_bars(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>> {
        let path = self.file_path(ticker);
        if !path.exists() {
            info!("No data file for {} at {}", ticker, path.display());
            return Ok(Vec::new());
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(BreakoutError::IoError)?;
        let bars = Self::parse_bars(&content, &path)?;
        debug!("Read {} rows from {}", bars.len(), path.display());

        Ok(util::normalize_series(bars, start, end, ticker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = "Date,Open,High,Low,Close,Adj Close,Volume\n\
        2024-01-04,10.0,10.5,9.8,10.2,10.2,1000\n\
        2024-01-02,9.5,10.1,9.4,10.0,10.0,1200\n\
        2024-01-03,null,null,null,null,null,null\n\
        2024-01-05,10.2,10.9,10.1,10.8,10.8,3000\n";

    #[test]
    fn test_parse_skips_null_rows() {
        let bars = CsvFileSource::parse_bars(SAMPLE, Path::new("sample.csv")).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].close, 10.2);
        assert_eq!(bars[2].volume, 3000.0);
    }

    #[test]
    fn test_parse_applies_adj_close() {
        let content = "Date,Open,High,Low,Close,Adj Close,Volume\n\
            2024-01-02,96.0,104.0,92.0,100.0,97.5,1000\n\
            2024-01-03,100.0,102.0,99.0,101.0,,2500\n";
        let bars = CsvFileSource::parse_bars(content, Path::new("adj.csv")).unwrap();
        assert_eq!(bars[0].close, 97.5);
        assert!((bars[0].open - 93.6).abs() < 1e-9);
        assert_eq!(bars[0].volume, 1000.0);
        assert_eq!(bars[1].close, 101.0);

        let plain = "Date,Open,High,Low,Close,Volume\n2024-01-02,1.0,1.0,1.0,1.0,10\n";
        let bars = CsvFileSource::parse_bars(plain, Path::new("plain.csv")).unwrap();
        assert_eq!(bars[0].close, 1.0);
    }

    #[tokio::test]
    async fn test_fetch_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("TEST.csv"), SAMPLE).unwrap();
        let source = CsvFileSource::new(dir.path().to_str().unwrap());

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        let bars = source.fetch_daily_bars("test", start, end).await.unwrap();

        let dates: Vec<String> = bars.iter().map(|b| b.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-02", "2024-01-04"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvFileSource::new(dir.path().to_str().unwrap());
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(source.fetch_daily_bars("NOPE", start, end).await.unwrap().is_empty());
    }
}
