use breakout_analyzer::export;
use breakout_analyzer::sources::InMemorySource;
use breakout_analyzer::{AnalysisParams, BreakoutAnalyzer, Config, DailyBar};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::sync::Arc;

// 构造一段合成日线：平稳运行后出现两次放量上涨
fn synthetic_series() -> Vec<DailyBar> {
    let mut bars = Vec::new();
    let mut date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let mut close = 50.0;

    while bars.len() < 120 {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            let i = bars.len();
            let (change, volume) = match i {
                40 | 85 => (0.045, 3_500_000.0),
                41..=50 => (0.004, 1_100_000.0),
                86..=95 => (-0.003, 1_000_000.0),
                _ => (if i % 2 == 0 { 0.006 } else { -0.005 }, 1_000_000.0),
            };
            let open = close;
            close *= 1.0 + change;
            bars.push(DailyBar::new(
                date,
                open,
                open.max(close) * 1.01,
                open.min(close) * 0.99,
                close,
                volume,
            ));
        }
        date += Duration::days(1);
    }
    bars
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let bars = synthetic_series();
    let start = bars[30].date;
    let end = bars[bars.len() - 1].date;

    let source = InMemorySource::new().with_series("DEMO", bars);
    let analyzer = BreakoutAnalyzer::new(Config::new(), Arc::new(source));

    let params = AnalysisParams::new("DEMO", start, end);
    let (events, summary) = analyzer.analyze(&params).await?;

    println!("{}", export::report_file_name(&params.ticker));
    print!("{}", export::render_report(&summary, &events)?);
    Ok(())
}
