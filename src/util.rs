use chrono::NaiveDate;
use log::info;

use crate::errors::{BreakoutError, Result};
use crate::models::bar::DailyBar;

// 日期转换工具
pub fn parse_iso_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
        BreakoutError::InvalidParameter(format!("Invalid date '{}': {}", date_str, e))
    })
}

/// 保留两位小数，恰好落在 .5 上时取偶数（银行家舍入）
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

// 整理数据源返回的序列：限定日期范围、按日期升序、同一日期只保留最后一条
pub fn normalize_series(
    mut bars: Vec<DailyBar>,
    start: NaiveDate,
    end: NaiveDate,
    symbol: &str,
) -> Vec<DailyBar> {
    let fetched = bars.len();
    bars.retain(|b| b.date >= start && b.date <= end);
    bars.sort_by_key(|b| b.date);

    let mut result: Vec<DailyBar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match result.last_mut() {
            Some(last) if last.date == bar.date => *last = bar,
            _ => result.push(bar),
        }
    }

    if result.len() != fetched {
        info!(
            "Normalized {} raw bars to {} trading days for {}",
            fetched,
            result.len(),
            symbol
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2024-03-15").unwrap(), date(2024, 3, 15));
        assert_eq!(parse_iso_date(" 2024-03-15 ").unwrap(), date(2024, 3, 15));
        assert!(parse_iso_date("2024-02-30").is_err());
        assert!(parse_iso_date("20240315").is_err());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(8.0), 8.0);
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(-2.345678), -2.35);
        assert_eq!(round2(0.004), 0.0);
    }

    #[test]
    fn test_round2_ties_to_even() {
        assert_eq!(round2(1.125), 1.12);
        assert_eq!(round2(2.125), 2.12);
        assert_eq!(round2(2.375), 2.38);
        assert_eq!(round2(-1.125), -1.12);
        assert_eq!(round2(17000.0 / 8000.0), 2.12);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[5.0]), Some(5.0));
        assert_eq!(median(&[3.0, -1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn test_normalize_series() {
        let bars = vec![
            DailyBar::new(date(2024, 1, 5), 1.0, 1.0, 1.0, 11.0, 100.0),
            DailyBar::new(date(2024, 1, 3), 1.0, 1.0, 1.0, 10.0, 100.0),
            DailyBar::new(date(2024, 1, 5), 1.0, 1.0, 1.0, 12.0, 100.0),
            DailyBar::new(date(2023, 12, 29), 1.0, 1.0, 1.0, 9.0, 100.0),
            DailyBar::new(date(2024, 1, 9), 1.0, 1.0, 1.0, 13.0, 100.0),
        ];
        let result = normalize_series(bars, date(2024, 1, 1), date(2024, 1, 8), "TEST");
        let dates: Vec<NaiveDate> = result.iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 3), date(2024, 1, 5)]);
        assert_eq!(result[1].close, 12.0);
    }
}
