use breakout_analyzer::config::Config;
use breakout_analyzer::errors::{BreakoutError, ErrorClass, Result};
use breakout_analyzer::export;
use breakout_analyzer::models::request::AnalysisRequest;
use breakout_analyzer::services::BreakoutAnalyzer;
use breakout_analyzer::sources::{CsvFileSource, MarketDataSource, YahooSource};

use clap::{App, Arg, ArgMatches, SubCommand};
use log::{error, info};
use std::sync::Arc;

fn build_app() -> App<'static> {
    App::new("BreakoutAnalyzer")
        .version(env!("CARGO_PKG_VERSION"))
        .author("BreakoutAnalyzer Developers")
        .about("Volume breakout event analysis for a single stock")
        .subcommand(
            SubCommand::with_name("analyze")
                .about("Find breakout days and measure the forward holding-period return")
                .arg(
                    Arg::with_name("ticker")
                        .short('t')
                        .long("ticker")
                        .value_name("TICKER")
                        .help("Instrument symbol, e.g. AAPL")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("start")
                        .short('s')
                        .long("start")
                        .value_name("DATE")
                        .help("First candidate date (YYYY-MM-DD)")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("end")
                        .short('e')
                        .long("end")
                        .value_name("DATE")
                        .help("Last date of loaded data (YYYY-MM-DD)")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("volume-threshold")
                        .long("volume-threshold")
                        .value_name("PCT")
                        .help("Volume vs 20-day average, in percent (200 = 2x)")
                        .takes_value(true)
                        .default_value("200"),
                )
                .arg(
                    Arg::with_name("price-threshold")
                        .long("price-threshold")
                        .value_name("PCT")
                        .help("Minimum daily close-to-close gain, in percent")
                        .takes_value(true)
                        .default_value("2"),
                )
                .arg(
                    Arg::with_name("holding-period")
                        .long("holding-period")
                        .value_name("SESSIONS")
                        .help("Trading sessions between entry and exit")
                        .takes_value(true)
                        .default_value("10"),
                )
                .arg(
                    Arg::with_name("source")
                        .long("source")
                        .value_name("SOURCE")
                        .help("Market data source")
                        .takes_value(true)
                        .possible_values(["yahoo", "csv"])
                        .default_value("yahoo"),
                )
                .arg(
                    Arg::with_name("data-dir")
                        .long("data-dir")
                        .value_name("DIR")
                        .help("Directory holding {TICKER}.csv files for the csv source")
                        .takes_value(true)
                        .default_value("data"),
                )
                .arg(
                    Arg::with_name("output-dir")
                        .short('o')
                        .long("output-dir")
                        .value_name("DIR")
                        .help("Directory to write {ticker}_analysis.csv into")
                        .takes_value(true)
                        .default_value("."),
                ),
        )
        .subcommand(SubCommand::with_name("health").about("Print a static liveness status"))
}

#[tokio::main]
async fn main() {
    // Initialize logger
    env_logger::init();

    let matches = build_app().get_matches();

    if matches.subcommand_matches("health").is_some() {
        println!("{}", serde_json::json!({ "status": "healthy" }));
        return;
    }

    if let Some(matches) = matches.subcommand_matches("analyze") {
        if let Err(e) = run_analyze(matches).await {
            let class = e.class();
            error!("Analysis failed: {}", e);
            eprintln!("{}: {}", class.status_code(), e);
            std::process::exit(match class {
                ErrorClass::NotFound => 4,
                ErrorClass::Internal => 1,
            });
        }
    } else {
        info!("No command specified. Use --help for usage information.");
    }
}

fn parse_arg<T: std::str::FromStr>(matches: &ArgMatches, name: &str) -> Result<T> {
    let raw = matches.value_of(name).unwrap_or_default();
    raw.parse::<T>()
        .map_err(|_| BreakoutError::InvalidParameter(format!("--{} has invalid value '{}'", name, raw)))
}

async fn run_analyze(matches: &ArgMatches) -> Result<()> {
    let config = Config::new()
        .with_data_dir(matches.value_of("data-dir").unwrap_or("data"))
        .with_output_dir(matches.value_of("output-dir").unwrap_or("."));

    let request = AnalysisRequest {
        ticker: matches.value_of("ticker").unwrap_or_default().to_string(),
        start_date: matches.value_of("start").unwrap_or_default().to_string(),
        end_date: matches.value_of("end").unwrap_or_default().to_string(),
        volume_threshold: parse_arg(matches, "volume-threshold")?,
        price_threshold: parse_arg(matches, "price-threshold")?,
        holding_period: parse_arg(matches, "holding-period")?,
    };
    let ticker = request.ticker.clone();

    let source: Arc<dyn MarketDataSource + Send + Sync> =
        match matches.value_of("source").unwrap_or("yahoo") {
            "csv" => Arc::new(CsvFileSource::new(&config.data_dir)),
            _ => Arc::new(YahooSource::new(&config)?),
        };

    let output_dir = config.output_dir.clone();
    let analyzer = BreakoutAnalyzer::new(config, source);
    let (events, summary) = analyzer.analyze_request(request).await?;

    for (key, value) in summary.entries() {
        info!("{:<15} {}", key, value);
    }

    let path = export::save_report(&output_dir, &ticker, &summary, &events)?;
    println!("{}", path.display());
    Ok(())
}
