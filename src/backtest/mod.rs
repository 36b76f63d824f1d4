pub mod engine;
pub mod result;
pub mod scenario;
pub mod performance;
pub mod data_provider;
pub mod sweep;

pub use engine::{BacktestEngine, EngineConfig};
pub use result::BacktestResult;
pub use scenario::{BacktestReport, BacktestScenario, BacktestScenarioBuilder};
pub use performance::{PerformanceSummary, ReportBuilder};
pub use data_provider::{CsvDataProvider, HistoricalDataProvider};
pub use sweep::{run_sweep, SweepResult};
