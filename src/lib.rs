//! SMA 크로스오버 백테스터 라이브러리
//!
//! 일별 가격 시계열에 대해 단기/장기 단순 이동평균 교차 전략을
//! 단일 포지션 롱 전용 계좌로 시뮬레이션합니다.

pub mod backtest;
pub mod config;
pub mod error;
pub mod indicators;
pub mod models;
pub mod signals;
pub mod utils;

// 핵심 타입 재노출
pub use crate::backtest::{
    BacktestEngine, BacktestReport, BacktestResult, BacktestScenarioBuilder, EngineConfig,
    PerformanceSummary, ReportBuilder,
};
pub use crate::error::BacktestError;
pub use crate::models::{AccountState, EquityPoint, PricePoint, Trade, TradeKind};
pub use crate::signals::{SignalComputer, SignalPoint};

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, BacktestError>;
