/**
* filename : error
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacktestError {
    #[error("Price series is empty")]
    EmptySeries,

    #[error("Non-positive price {price} on {date}")]
    NonPositivePrice { date: NaiveDate, price: Decimal },

    #[error("Price series is not strictly increasing by date at {date}")]
    UnorderedSeries { date: NaiveDate },

    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Data not found: {0}")]
    DataNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<::config::ConfigError> for BacktestError {
    fn from(err: ::config::ConfigError) -> Self {
        BacktestError::ConfigError(err.to_string())
    }
}
