//! CSV 로드부터 요약까지 전체 파이프라인 테스트

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use sma_crossover::backtest::{run_sweep, BacktestScenarioBuilder, CsvDataProvider, HistoricalDataProvider};
use sma_crossover::config::Config;
use sma_crossover::error::BacktestError;
use sma_crossover::models::TradeKind;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("sma_crossover_pipeline_tests");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

// 중복 날짜 한 건, 빈 가격 한 건 포함
const PRICES: &str = "\
Date,Close
2024-01-02,10
2024-01-03,10
2024-01-03,55
2024-01-04,10
2024-01-05,12
2024-01-08,
2024-01-09,8
2024-01-10,8
2024-01-11,8
";

#[test]
fn test_scenario_from_csv() {
    let path = write_fixture("LOSS.csv", PRICES);

    let scenario = BacktestScenarioBuilder::new("LOSS")
        .period(date(2024, 1, 1), date(2024, 2, 1))
        .initial_budget(dec!(100))
        .windows(2, 3)
        .data_file(path)
        .build()
        .unwrap();

    let report = scenario.run().unwrap();
    let trades = &report.result.trades;

    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].kind, TradeKind::Buy);
    assert_eq!(trades[0].date, date(2024, 1, 5));
    assert_eq!(trades[1].kind, TradeKind::Sell);
    assert_eq!(trades[1].date, date(2024, 1, 9));
    assert_eq!(trades[1].realized_profit, Some(dec!(-32)));

    assert_eq!(report.result.equity_curve.len(), 8);
    assert_eq!(report.summary.final_cash, dec!(68));
    assert_eq!(report.summary.roi_percent, dec!(-32));
    assert_eq!(report.summary.symbol, "LOSS");

    let text = report.summary.to_string();
    assert!(text.contains("Final Cash: 68.00"));
    assert!(text.contains("Trades: 1"));
}

#[test]
fn test_scenario_end_date_is_exclusive() {
    let path = write_fixture("CUT.csv", PRICES);

    // 1/9 이후가 잘리면 포지션이 열린 채 끝나므로 강제 청산
    let report = BacktestScenarioBuilder::new("CUT")
        .period(date(2024, 1, 1), date(2024, 1, 9))
        .initial_budget(dec!(100))
        .windows(2, 3)
        .data_file(path)
        .build()
        .unwrap()
        .run()
        .unwrap();

    let last = report.result.trades.last().unwrap();
    assert_eq!(last.kind, TradeKind::ForcedSell);
    assert_eq!(last.date, date(2024, 1, 8));
    assert_eq!(last.price, dec!(12));
    assert_eq!(report.summary.final_cash, dec!(100));
}

#[test]
fn test_scenario_without_data_in_range() {
    let path = write_fixture("OLD.csv", PRICES);

    let result = BacktestScenarioBuilder::new("OLD")
        .period(date(2030, 1, 1), date(2030, 2, 1))
        .data_file(path)
        .build()
        .unwrap()
        .run();

    assert!(matches!(result, Err(BacktestError::DataNotFound(_))));
}

#[test]
fn test_scenario_from_default_config() {
    let path = write_fixture("CFG.csv", PRICES);
    let mut config = Config::default();
    config.strategy.symbol = "CFG".to_string();
    config.strategy.start_date = date(2024, 1, 1);
    config.strategy.end_date = date(2024, 2, 1);
    config.data.file_path = Some(path.to_string_lossy().to_string());

    let report = BacktestScenarioBuilder::from_config(&config.strategy)
        .data_file(PathBuf::from(config.price_file()))
        .build()
        .unwrap()
        .run()
        .unwrap();

    // 기본 윈도우 50/200 보다 데이터가 짧아 거래 없음
    assert!(report.result.trades.is_empty());
    assert_eq!(report.summary.final_cash, dec!(5000));
    assert_eq!(report.summary.roi_percent, dec!(0));
}

#[test]
fn test_sweep_over_csv_series() {
    let path = write_fixture("SWEEP.csv", PRICES);
    let provider = CsvDataProvider::new(path, ',').unwrap();
    let series = provider
        .load_series("SWEEP", date(2024, 1, 1), date(2024, 2, 1))
        .unwrap();

    let results = run_sweep(&series, dec!(100), &[1, 2], &[2, 3, 4]).unwrap();

    assert_eq!(results.len(), 5);
    let pair = results.iter().find(|r| r.short_window == 2 && r.long_window == 3).unwrap();
    assert_eq!(pair.final_cash, dec!(68));
}
