//! 로깅 유틸리티
//!
//! 로그 초기화 및 백테스트 로그 함수 제공

use env_logger::Builder;
use log::LevelFilter;
use std::env;

/// 로그 레벨 문자열 파싱 (알 수 없는 값은 info)
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// 로깅 시스템 초기화
///
/// RUST_LOG 환경변수가 있으면 설정 파일의 레벨보다 우선한다.
pub fn init(default_level: &str) {
    let mut builder = Builder::from_default_env();

    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    // 이미 초기화된 경우 (테스트 등) 무시
    let _ = builder
      .filter_level(parse_level(&log_level))
      .format_timestamp_millis()
      .try_init();

    log::debug!("로깅 시스템 초기화 완료: 레벨 = {}", log_level);
}

/// 백테스트 시작 로그
pub fn log_backtest_start(symbol: &str, short_window: usize, long_window: usize, points: usize) {
    log::info!("백테스트 시작: {} - SMA {}/{} - 데이터 {}건",
               symbol, short_window, long_window, points);
}

/// 백테스트 종료 로그
pub fn log_backtest_end(symbol: &str, trades: usize, final_cash: &str) {
    log::info!("백테스트 종료: {} - 거래 {}건 - 최종 현금: {}", symbol, trades, final_cash);
}
