use crate::errors::{BreakoutError, Result};
use crate::models::breakout::{AnalysisSummary, BreakoutEvent};
use log::info;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const EVENT_COLUMNS: [&str; 6] = [
    "Date",
    "Entry_Price",
    "Exit_Price",
    "Volume_Ratio",
    "Daily_Return",
    "Total_Return",
];

/// 报告文件名：`{ticker}_analysis.csv`
pub fn report_file_name(ticker: &str) -> String {
    format!("{}_analysis.csv", ticker)
}

/// Writes the summary block, a blank line, then the trade table.
pub fn write_report<W: Write>(
    mut writer: W,
    summary: &AnalysisSummary,
    events: &[BreakoutEvent],
) -> Result<()> {
    writeln!(writer, "Summary Statistics")?;
    {
        let mut csv_writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut writer);
        for (key, value) in summary.entries() {
            csv_writer.write_record([key, value.as_str()])?;
        }
        csv_writer.flush()?;
    }

    writeln!(writer)?;
    writeln!(writer, "Detailed Trade List")?;

    let mut csv_writer = csv::Writer::from_writer(&mut writer);
    csv_writer.write_record(EVENT_COLUMNS)?;
    for event in events {
        csv_writer.write_record([
            event.date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", event.entry_price),
            format!("{:.2}", event.exit_price),
            format!("{:.2}", event.volume_ratio),
            format!("{:.2}", event.daily_return),
            format!("{:.2}", event.total_return),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn render_report(summary: &AnalysisSummary, events: &[BreakoutEvent]) -> Result<String> {
    let mut buffer = Vec::new();
    write_report(&mut buffer, summary, events)?;
    String::from_utf8(buffer).map_err(|e| BreakoutError::Unknown(e.to_string()))
}

/// 将报告保存到目录中，返回文件路径
pub fn save_report(
    dir: &str,
    ticker: &str,
    summary: &AnalysisSummary,
    events: &[BreakoutEvent],
) -> Result<PathBuf> {
    let dir = Path::new(dir);
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let path = dir.join(report_file_name(ticker));
    let file = fs::File::create(&path)?;
    write_report(std::io::BufWriter::new(file), summary, events)?;

    info!("Saved {} trades to {}", events.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> (AnalysisSummary, Vec<BreakoutEvent>) {
        let events = vec![
            BreakoutEvent {
                date: NaiveDate::from_ymd_opt(2024, 2, 6).unwrap(),
                entry_price: 100.0,
                exit_price: 108.0,
                volume_ratio: 2.5,
                daily_return: 3.0,
                total_return: 8.0,
            },
            BreakoutEvent {
                date: NaiveDate::from_ymd_opt(2024, 4, 11).unwrap(),
                entry_price: 52.37,
                exit_price: 50.12,
                volume_ratio: 3.14,
                daily_return: 4.56,
                total_return: -4.3,
            },
        ];
        let summary = AnalysisSummary {
            total_trades: 2,
            average_return: 1.85,
            median_return: 1.85,
            win_rate: 50.0,
            best_trade: 8.0,
            worst_trade: -4.3,
        };
        (summary, events)
    }

    #[test]
    fn test_report_layout() {
        let (summary, events) = sample();
        let report = render_report(&summary, &events).unwrap();
        let expected = "Summary Statistics\n\
            Total_Trades,2\n\
            Average_Return,1.85\n\
            Median_Return,1.85\n\
            Win_Rate,50.00\n\
            Best_Trade,8.00\n\
            Worst_Trade,-4.30\n\
            \n\
            Detailed Trade List\n\
            Date,Entry_Price,Exit_Price,Volume_Ratio,Daily_Return,Total_Return\n\
            2024-02-06,100.00,108.00,2.50,3.00,8.00\n\
            2024-04-11,52.37,50.12,3.14,4.56,-4.30\n";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_save_report_uses_ticker_file_name() {
        let (summary, events) = sample();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports");

        let path = save_report(out.to_str().unwrap(), "AAPL", &summary, &events).unwrap();
        assert_eq!(path.file_name().unwrap(), "AAPL_analysis.csv");

        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("Summary Statistics\nTotal_Trades,2\n"));
    }
}
