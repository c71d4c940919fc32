// 公开导出的模块，供外部使用
pub mod models;
pub mod errors;
pub mod config;
pub mod indicators;
pub mod sources;
pub mod services;
pub mod export;

#[doc(hidden)]
pub mod util;

// 重新导出常用类型，方便使用
pub use models::bar::{DailyBar, EnrichedBar};
pub use models::breakout::{AnalysisSummary, BreakoutEvent};
pub use models::request::{AnalysisParams, AnalysisRequest};
pub use services::BreakoutAnalyzer;
pub use sources::MarketDataSource;
pub use errors::{Result, BreakoutError, ErrorClass};
pub use config::Config;
