pub mod analysis_service;

pub use analysis_service::BreakoutAnalyzer;
