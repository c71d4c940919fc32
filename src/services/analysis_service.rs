use crate::config::Config;
use crate::errors::{BreakoutError, Result};
use crate::indicators;
use crate::models::bar::EnrichedBar;
use crate::models::breakout::{AnalysisSummary, BreakoutEvent};
use crate::models::request::{AnalysisParams, AnalysisRequest};
use crate::sources::base::MarketDataSource;
use crate::util;
use chrono::Duration;
use log::{debug, info};
use std::sync::Arc;

/// 突破分析服务：抓取日线、计算滚动指标、筛选突破日并统计持有期收益
///
/// The analyzer keeps no state between calls; the same inputs against an
/// unchanged source always produce the same output.
pub struct BreakoutAnalyzer {
    config: Config,
    source: Arc<dyn MarketDataSource + Send + Sync>,
}

impl BreakoutAnalyzer {
    /// 创建新的分析服务实例
    pub fn new(config: Config, source: Arc<dyn MarketDataSource + Send + Sync>) -> Self {
        Self { config, source }
    }

    /// 从外部请求执行分析（含参数校验与默认值）
    pub async fn analyze_request(
        &self,
        request: AnalysisRequest,
    ) -> Result<(Vec<BreakoutEvent>, AnalysisSummary)> {
        let params = request.into_params()?;
        self.analyze(&params).await
    }

    pub async fn analyze(
        &self,
        params: &AnalysisParams,
    ) -> Result<(Vec<BreakoutEvent>, AnalysisSummary)> {
        params.validate()?;

        if params.start_date > params.end_date {
            info!(
                "Inverted date range for {}: {} > {}",
                params.ticker, params.start_date, params.end_date
            );
            return Err(BreakoutError::no_data());
        }

        // 向前多取一段自然日，保证首个候选日之前已有完整的均量窗口
        let fetch_start = params.start_date - Duration::days(self.config.buffer_days);
        info!(
            "Fetching {} from {} via {} (analysis window {} ~ {})",
            params.ticker,
            fetch_start,
            self.source.source_name(),
            params.start_date,
            params.end_date
        );

        let bars = self
            .source
            .fetch_daily_bars(&params.ticker, fetch_start, params.end_date)
            .await?;
        let bars = util::normalize_series(bars, fetch_start, params.end_date, &params.ticker);
        if bars.is_empty() {
            return Err(BreakoutError::no_data());
        }
        info!("Loaded {} trading days for {}", bars.len(), params.ticker);

        let enriched = indicators::enrich(&bars, self.config.volume_window);
        let events = detect_breakouts(&enriched, params)?;
        if events.is_empty() {
            return Err(BreakoutError::NoEvents);
        }

        let summary = summarize(&events)?;
        info!(
            "{}: {} breakout trades, average return {:.2}%, win rate {:.2}%",
            params.ticker, summary.total_trades, summary.average_return, summary.win_rate
        );
        Ok((events, summary))
    }
}

/// Selects breakout days at or after `params.start_date` and projects each
/// one `holding_period` sessions forward by position in `bars`.
///
/// Candidates without a full holding period of later bars are dropped.
pub fn detect_breakouts(bars: &[EnrichedBar], params: &AnalysisParams) -> Result<Vec<BreakoutEvent>> {
    let volume_cutoff = params.volume_ratio_cutoff();
    let return_cutoff = params.daily_return_cutoff();

    let mut events = Vec::new();
    let mut candidates = 0usize;

    for (idx, bar) in bars.iter().enumerate() {
        if bar.date() < params.start_date {
            continue;
        }
        let (ratio, daily_return) = match (bar.volume_ratio, bar.daily_return) {
            (Some(r), Some(d)) if r > volume_cutoff && d > return_cutoff => (r, d),
            _ => continue,
        };
        candidates += 1;

        let exit_idx = idx + params.holding_period;
        let exit = match bars.get(exit_idx) {
            Some(exit) => exit,
            None => {
                debug!(
                    "Dropping breakout on {}: only {} sessions remain",
                    bar.date(),
                    bars.len() - idx - 1
                );
                continue;
            }
        };

        let entry_price = bar.close();
        if entry_price <= 0.0 {
            return Err(BreakoutError::DegenerateData(format!(
                "entry close {} on {}",
                entry_price,
                bar.date()
            )));
        }
        let exit_price = exit.close();
        let total_return = (exit_price - entry_price) / entry_price * 100.0;

        events.push(BreakoutEvent {
            date: bar.date(),
            entry_price: util::round2(entry_price),
            exit_price: util::round2(exit_price),
            volume_ratio: util::round2(ratio),
            daily_return: util::round2(daily_return * 100.0),
            total_return: util::round2(total_return),
        });
    }

    info!("{} breakout candidates, {} with a full holding period", candidates, events.len());
    Ok(events)
}

pub fn summarize(events: &[BreakoutEvent]) -> Result<AnalysisSummary> {
    let returns: Vec<f64> = events.iter().map(|e| e.total_return).collect();

    let average = util::mean(&returns).ok_or(BreakoutError::NoEvents)?;
    let median = util::median(&returns).ok_or(BreakoutError::NoEvents)?;
    let wins = returns.iter().filter(|&&r| r > 0.0).count();
    let best = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let worst = returns.iter().copied().fold(f64::INFINITY, f64::min);

    Ok(AnalysisSummary {
        total_trades: events.len(),
        average_return: util::round2(average),
        median_return: util::round2(median),
        win_rate: util::round2(wins as f64 / events.len() as f64 * 100.0),
        best_trade: util::round2(best),
        worst_trade: util::round2(worst),
    })
}
