use thiserror::Error;

#[derive(Error, Debug)]
pub enum BreakoutError {
    #[error("{0}")]
    NotFound(String),

    #[error("No breakout events found for the specified criteria")]
    NoEvents,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Degenerate data: {0}")]
    DegenerateData(String),

    #[error("Data source error: {0}")]
    DataSourceError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Date parsing error: {0}")]
    DateError(#[from] chrono::ParseError),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, BreakoutError>;

/// 对外边界上的错误分类：调用方可处理的“未找到”与内部错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    NotFound,
    Internal,
}

impl ErrorClass {
    /// HTTP 风格的状态码
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorClass::NotFound => 404,
            ErrorClass::Internal => 500,
        }
    }
}

impl BreakoutError {
    pub fn no_data() -> Self {
        BreakoutError::NotFound("No data found for the specified ticker and date range".to_string())
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            BreakoutError::NotFound(_) | BreakoutError::NoEvents => ErrorClass::NotFound,
            _ => ErrorClass::Internal,
        }
    }
}

// 用于从字符串创建错误
impl From<String> for BreakoutError {
    fn from(s: String) -> Self {
        BreakoutError::Unknown(s)
    }
}

// 用于从&str创建错误
impl From<&str> for BreakoutError {
    fn from(s: &str) -> Self {
        BreakoutError::Unknown(s.to_string())
    }
}
