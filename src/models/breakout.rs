use chrono::NaiveDate;
use serde::Serialize;

/// 单个突破事件：入场为突破日收盘，出场为持有期后的收盘
///
/// 价格与百分比字段均已保留两位小数。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakoutEvent {
    pub date: NaiveDate,
    pub entry_price: f64,
    pub exit_price: f64,
    pub volume_ratio: f64,
    /// 突破日涨幅（百分比）
    pub daily_return: f64,
    /// 持有期收益（百分比）
    pub total_return: f64,
}

/// 一次分析中所有事件的汇总统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub total_trades: usize,
    pub average_return: f64,
    pub median_return: f64,
    pub win_rate: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
}

impl AnalysisSummary {
    /// Key/value pairs in report order, as they appear in the exported file.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total_Trades", self.total_trades.to_string()),
            ("Average_Return", format!("{:.2}", self.average_return)),
            ("Median_Return", format!("{:.2}", self.median_return)),
            ("Win_Rate", format!("{:.2}", self.win_rate)),
            ("Best_Trade", format!("{:.2}", self.best_trade)),
            ("Worst_Trade", format!("{:.2}", self.worst_trade)),
        ]
    }
}
