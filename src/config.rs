/**
* filename : config
* author : HAMA
* date: 2025. 5. 8.
* description: 기본값 -> 설정 파일 -> 환경변수 순으로 덮어쓰는 설정
**/

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::BacktestError;
use crate::signals::validate_windows;

/// 환경변수 접두사 (예: SMA__STRATEGY__SHORT_WINDOW=20)
pub const ENV_PREFIX: &str = "SMA";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub strategy: StrategyConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_budget: Decimal,
    pub short_window: usize,
    pub long_window: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// 가격 CSV 경로. 없으면 `<data_dir>/<symbol>.csv`
    pub file_path: Option<String>,
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    /// Load configuration from `config.{toml,json,yaml}` (optional) and environment
    pub fn load() -> Result<Self, BacktestError> {
        Self::load_from("config")
    }

    /// Load configuration with an explicit file stem or path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, BacktestError> {
        let name = path.as_ref().to_string_lossy().to_string();

        let cfg: Config = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Config::default())?)
            .add_source(::config::File::with_name(&name).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), BacktestError> {
        let strategy = &self.strategy;

        if strategy.symbol.trim().is_empty() {
            return Err(BacktestError::ConfigError("strategy.symbol is empty".to_string()));
        }

        if strategy.start_date >= strategy.end_date {
            return Err(BacktestError::ConfigError(format!(
                "strategy.start_date {} must be before strategy.end_date {}",
                strategy.start_date, strategy.end_date
            )));
        }

        if strategy.initial_budget <= Decimal::ZERO {
            return Err(BacktestError::ConfigError(format!(
                "strategy.initial_budget must be positive, got {}",
                strategy.initial_budget
            )));
        }

        validate_windows(strategy.short_window, strategy.long_window)
    }

    /// 가격 CSV 경로 결정
    pub fn price_file(&self) -> String {
        match &self.data.file_path {
            Some(path) => path.clone(),
            None => Path::new(&self.data.data_dir)
                .join(format!("{}.csv", self.strategy.symbol))
                .to_string_lossy()
                .to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            strategy: StrategyConfig {
                symbol: "AAPL".to_string(),
                start_date: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default(),
                end_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or_default(),
                initial_budget: Decimal::new(500000, 2),
                short_window: 50,
                long_window: 200,
            },
            data: DataConfig {
                file_path: None,
                data_dir: "./data".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}
