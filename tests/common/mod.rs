#![allow(dead_code)]
use breakout_analyzer::sources::InMemorySource;
use breakout_analyzer::{BreakoutAnalyzer, Config, DailyBar};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::sync::Arc;

pub const TICKER: &str = "TEST";
pub const BASE_VOLUME: f64 = 7000.0;
// 19000 / ((19 * 7000 + 19000) / 20) = 2.5
pub const BREAKOUT_VOLUME: f64 = 19000.0;
pub const PRE_BREAKOUT_CLOSE: f64 = 100.0 / 1.03;

/// Weekdays only, starting at `first`.
pub fn trading_days(first: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(n);
    let mut day = first;
    while days.len() < n {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(day);
        }
        day += Duration::days(1);
    }
    days
}

pub fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

pub fn build_series(closes: &[f64], volumes: &[f64]) -> Vec<DailyBar> {
    trading_days(first_day(), closes.len())
        .into_iter()
        .zip(closes.iter().zip(volumes))
        .map(|(date, (&close, &volume))| DailyBar::new(date, close, close, close, close, volume))
        .collect()
}

/// One breakout at index 24 (close 100, ratio 2.5, +3%) followed by
/// `future_bars` sessions; the close steps up to 108 ten sessions later.
pub fn single_breakout(future_bars: usize) -> Vec<DailyBar> {
    let len = 25 + future_bars;
    let mut closes = vec![PRE_BREAKOUT_CLOSE; 24];
    let mut volumes = vec![BASE_VOLUME; len];
    closes.push(100.0);
    volumes[24] = BREAKOUT_VOLUME;
    for i in 25..len {
        closes.push(if i >= 34 { 108.0 } else { 100.0 });
    }
    build_series(&closes, &volumes)
}

/// Two breakouts: index 24 (100 -> 108, +8%) and index 45 (113.4 -> 102.06, -10%).
pub fn two_breakouts() -> Vec<DailyBar> {
    let len = 60;
    let mut closes = Vec::with_capacity(len);
    let mut volumes = vec![BASE_VOLUME; len];
    for i in 0..len {
        let close = match i {
            0..=23 => PRE_BREAKOUT_CLOSE,
            24..=33 => 100.0,
            34..=44 => 108.0,
            45..=54 => 113.4,
            _ => 102.06,
        };
        closes.push(close);
    }
    volumes[24] = BREAKOUT_VOLUME;
    volumes[45] = BREAKOUT_VOLUME;
    build_series(&closes, &volumes)
}

pub fn analyzer_for(bars: Vec<DailyBar>) -> BreakoutAnalyzer {
    let source = InMemorySource::new().with_series(TICKER, bars);
    BreakoutAnalyzer::new(Config::new(), Arc::new(source))
}
