use std::path::PathBuf;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::backtest::data_provider::{CsvDataProvider, HistoricalDataProvider};
use crate::backtest::engine::{BacktestEngine, EngineConfig};
use crate::backtest::performance::{PerformanceSummary, ReportBuilder};
use crate::backtest::result::BacktestResult;
use crate::config::StrategyConfig;
use crate::error::BacktestError;
use crate::utils::logging;

/// 한 번의 백테스트 실행 결과 (요약 + 거래/자산 곡선)
#[derive(Debug, Clone, Serialize)]
pub struct BacktestReport {
    pub summary: PerformanceSummary,
    #[serde(flatten)]
    pub result: BacktestResult,
}

/// 백테스트 시나리오: 데이터 로드 -> 신호 -> 시뮬레이션 -> 요약
pub struct BacktestScenario {
    symbol: String,
    start: NaiveDate,
    end: NaiveDate,
    engine: BacktestEngine,
    provider: Box<dyn HistoricalDataProvider>,
}

impl BacktestScenario {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn engine(&self) -> &BacktestEngine {
        &self.engine
    }

    /// 시나리오 실행
    pub fn run(&self) -> Result<BacktestReport, BacktestError> {
        let series = self.provider.load_series(&self.symbol, self.start, self.end)?;

        let computer = self.engine.signal_computer();
        logging::log_backtest_start(
            &self.symbol,
            computer.short_window(),
            computer.long_window(),
            series.len(),
        );

        let result = self.engine.run(&series)?;
        let summary = ReportBuilder::build(&self.symbol, self.start, self.end, &result);

        logging::log_backtest_end(
            &self.symbol,
            summary.trades,
            &summary.for_display().final_cash.to_string(),
        );

        Ok(BacktestReport { summary, result })
    }
}

/// 시나리오 빌더 패턴
pub struct BacktestScenarioBuilder {
    symbol: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    initial_budget: Decimal,
    short_window: usize,
    long_window: usize,
    data_file: Option<PathBuf>,
    delimiter: char,
    provider: Option<Box<dyn HistoricalDataProvider>>,
}

impl BacktestScenarioBuilder {
    pub fn new(symbol: impl Into<String>) -> Self {
        let defaults = EngineConfig::default();
        BacktestScenarioBuilder {
            symbol: symbol.into(),
            start: None,
            end: None,
            initial_budget: defaults.initial_cash,
            short_window: defaults.short_window,
            long_window: defaults.long_window,
            data_file: None,
            delimiter: ',',
            provider: None,
        }
    }

    /// 설정 파일의 전략 섹션으로 빌더 초기화
    pub fn from_config(strategy: &StrategyConfig) -> Self {
        BacktestScenarioBuilder::new(strategy.symbol.clone())
            .period(strategy.start_date, strategy.end_date)
            .initial_budget(strategy.initial_budget)
            .windows(strategy.short_window, strategy.long_window)
    }

    pub fn period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn initial_budget(mut self, amount: Decimal) -> Self {
        self.initial_budget = amount;
        self
    }

    pub fn windows(mut self, short_window: usize, long_window: usize) -> Self {
        self.short_window = short_window;
        self.long_window = long_window;
        self
    }

    pub fn data_file(mut self, file_path: PathBuf) -> Self {
        self.data_file = Some(file_path);
        self
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// CSV 대신 임의의 데이터 제공자 사용
    pub fn provider(mut self, provider: Box<dyn HistoricalDataProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn build(self) -> Result<BacktestScenario, BacktestError> {
        let start = self.start.ok_or_else(||
            BacktestError::InvalidParameter("Start date not set".to_string())
        )?;

        let end = self.end.ok_or_else(||
            BacktestError::InvalidParameter("End date not set".to_string())
        )?;

        if start >= end {
            return Err(BacktestError::InvalidParameter(format!(
                "Start date {} must be before end date {}",
                start, end
            )));
        }

        let engine = BacktestEngine::new(EngineConfig {
            initial_cash: self.initial_budget,
            short_window: self.short_window,
            long_window: self.long_window,
        })?;

        let provider: Box<dyn HistoricalDataProvider> = match (self.provider, self.data_file) {
            (Some(provider), _) => provider,
            (None, Some(path)) => Box::new(CsvDataProvider::new(path, self.delimiter)?),
            (None, None) => {
                return Err(BacktestError::InvalidParameter("No data source specified".to_string()))
            }
        };

        Ok(BacktestScenario {
            symbol: self.symbol,
            start,
            end,
            engine,
            provider,
        })
    }
}
