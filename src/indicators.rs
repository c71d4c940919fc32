//! Rolling statistics over an ascending daily series.
//!
//! Every derived value at position `t` depends only on bars `..=t`, so the
//! enrichment never looks ahead.

use crate::models::bar::{DailyBar, EnrichedBar};

/// Trailing simple moving average of volume, `None` until `window` bars exist.
pub fn rolling_volume_mean(bars: &[DailyBar], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; bars.len()];
    }

    // 前缀和：prefix[i] 为前 i 根K线的成交量之和
    let mut prefix = Vec::with_capacity(bars.len() + 1);
    prefix.push(0.0);
    for bar in bars {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + bar.volume);
    }

    (0..bars.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                Some((prefix[i + 1] - prefix[i + 1 - window]) / window as f64)
            }
        })
        .collect()
}

/// Close-to-close percentage change, `None` for the first bar.
pub fn daily_returns(bars: &[DailyBar]) -> Vec<Option<f64>> {
    let mut returns = Vec::with_capacity(bars.len());
    for i in 0..bars.len() {
        if i == 0 {
            returns.push(None);
            continue;
        }
        let prev = bars[i - 1].close;
        if prev == 0.0 {
            returns.push(None);
        } else {
            returns.push(Some((bars[i].close - prev) / prev));
        }
    }
    returns
}

pub fn enrich(bars: &[DailyBar], window: usize) -> Vec<EnrichedBar> {
    let volume_ma = rolling_volume_mean(bars, window);
    let returns = daily_returns(bars);

    bars.iter()
        .zip(volume_ma)
        .zip(returns)
        .map(|((bar, ma), daily_return)| {
            let volume_ratio = match ma {
                Some(avg) if avg != 0.0 => Some(bar.volume / avg),
                _ => None,
            };
            EnrichedBar {
                bar: bar.clone(),
                volume_ma: ma,
                daily_return,
                volume_ratio,
            }
        })
        .collect()
}
